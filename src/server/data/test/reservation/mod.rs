use crate::{
    model::reservation::ReservationStatus,
    server::{
        data::reservation::ReservationRepository,
        error::AppError,
        model::reservation::ReservationFilter,
    },
};
use chrono::{Duration, Utc};
use sea_orm::EntityTrait;
use test_utils::{
    builder::TestBuilder,
    factory,
    factory::{reservation::ReservationFactory, room::RoomFactory},
};

mod cancel_stale_pending;
mod get_paginated;
mod update_status;
