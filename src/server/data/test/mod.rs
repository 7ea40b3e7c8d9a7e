mod agreement;
mod application;
mod dormitory;
mod refresh_token;
mod reservation;
mod room;
mod schedule;
mod user;
