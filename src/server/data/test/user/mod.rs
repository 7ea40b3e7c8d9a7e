use crate::{
    model::user::Role,
    server::{
        data::user::UserRepository,
        error::AppError,
        model::{
            pagination::PageRequest,
            user::{CreateUserParams, UserFilter},
        },
    },
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
