use crate::server::{
    data::room::RoomRepository,
    error::AppError,
    model::{pagination::PageRequest, room::RoomFilter},
};
use test_utils::{builder::TestBuilder, factory, factory::room::RoomFactory};

mod get_paginated;
mod totals;
