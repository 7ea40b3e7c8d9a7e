use crate::server::{data::refresh_token::RefreshTokenRepository, error::AppError};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod revoke;
