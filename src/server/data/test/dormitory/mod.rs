use crate::server::{
    data::dormitory::DormitoryRepository, error::AppError, model::dormitory::DormitoryParams,
};
use test_utils::{
    builder::TestBuilder,
    factory,
    factory::{dormitory::DormitoryFactory, room::RoomFactory},
};

mod management;
mod totals;
