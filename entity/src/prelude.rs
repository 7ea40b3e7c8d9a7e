pub use super::accommodation_application::Entity as AccommodationApplication;
pub use super::dormitory::Entity as Dormitory;
pub use super::event::Entity as Event;
pub use super::faculty::Entity as Faculty;
pub use super::refresh_token::Entity as RefreshToken;
pub use super::room::Entity as Room;
pub use super::room_reservation::Entity as RoomReservation;
pub use super::settlement_agreement::Entity as SettlementAgreement;
pub use super::settlement_schedule::Entity as SettlementSchedule;
pub use super::student_group::Entity as StudentGroup;
pub use super::user::Entity as User;
