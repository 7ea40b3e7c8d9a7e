use crate::{
    model::agreement::AgreementStatus,
    server::{
        data::agreement::AgreementRepository,
        error::AppError,
        model::{
            agreement::{AgreementFilter, AgreementParams},
            pagination::PageRequest,
        },
    },
};
use chrono::{Datelike, Duration, Utc};
use test_utils::{builder::TestBuilder, factory, factory::agreement::AgreementFactory};

mod archive_expired;
mod create;
mod update_status;
