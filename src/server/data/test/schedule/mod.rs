use crate::server::{
    data::schedule::ScheduleRepository, error::AppError, model::schedule::ScheduleFilter,
};
use chrono::{Duration, NaiveTime, Utc};
use test_utils::{builder::TestBuilder, factory, factory::schedule::ScheduleFactory};

mod list;
