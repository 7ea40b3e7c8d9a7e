use crate::{
    model::application::ApplicationStatus,
    server::{
        data::application::ApplicationRepository,
        error::AppError,
        model::{
            application::{ApplicationFilter, ApplicationReview, CreateApplicationParams},
            pagination::PageRequest,
        },
    },
};
use test_utils::{builder::TestBuilder, factory, factory::application::ApplicationFactory};

mod apply_review;
mod get_paginated;
mod has_open;
