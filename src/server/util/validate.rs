//! Request body validation.
//!
//! Every request DTO that carries user input implements [`Validate`]. Controllers call
//! `validate()` before converting the DTO into service parameters, so malformed input is
//! rejected with `400 Bad Request` before any database work happens.

use crate::{
    model::{
        agreement::AgreementFormDto,
        application::CreateApplicationDto,
        auth::{ChangePasswordDto, LoginDto, RegisterDto},
        dormitory::{DormitoryFormDto, RoomFormDto},
        event::EventFormDto,
        faculty::{FacultyFormDto, GroupFormDto},
        reservation::CreateReservationDto,
        schedule::ScheduleEntryFormDto,
        user::{CreateUserDto, UpdateProfileDto, UpdateUserDto},
    },
    server::error::AppError,
};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;
const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 255;
const MAX_PHONE_LEN: usize = 32;
const MAX_PASSPORT_LEN: usize = 32;
const MAX_TITLE_LEN: usize = 200;
pub const COURSES: std::ops::RangeInclusive<i16> = 1..=6;

/// Checks a request body before it reaches the service layer.
pub trait Validate {
    /// # Returns
    /// - `Ok(())` - The body is well formed
    /// - `Err(AppError::BadRequest)` - Message names the first offending field
    fn validate(&self) -> Result<(), AppError>;
}

fn invalid(message: impl Into<String>) -> AppError {
    AppError::BadRequest(message.into())
}

fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(format!("{} must not be empty", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(invalid(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}

fn require_email(value: &str) -> Result<(), AppError> {
    require_text("email", value, MAX_EMAIL_LEN)?;

    let valid = value
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
        });
    if !valid {
        return Err(invalid("email is not a valid address"));
    }
    Ok(())
}

pub fn require_password(field: &str, value: &str) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(invalid(format!(
            "{} must be at least {} characters",
            field, MIN_PASSWORD_LEN
        )));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(invalid(format!(
            "{} must be at most {} characters",
            field, MAX_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn optional_phone(value: Option<&String>) -> Result<(), AppError> {
    let Some(phone) = value else {
        return Ok(());
    };

    let phone = phone.trim();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
    if phone.is_empty() || !allowed || phone.len() > MAX_PHONE_LEN {
        return Err(invalid("phone is not a valid phone number"));
    }
    Ok(())
}

fn require_course(value: i16) -> Result<(), AppError> {
    if !COURSES.contains(&value) {
        return Err(invalid(format!(
            "course must be between {} and {}",
            COURSES.start(),
            COURSES.end()
        )));
    }
    Ok(())
}

impl Validate for RegisterDto {
    fn validate(&self) -> Result<(), AppError> {
        require_email(&self.email)?;
        require_password("password", &self.password)?;
        require_text("first_name", &self.first_name, MAX_NAME_LEN)?;
        require_text("last_name", &self.last_name, MAX_NAME_LEN)?;
        optional_phone(self.phone.as_ref())
    }
}

impl Validate for LoginDto {
    fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(invalid("email and password are required"));
        }
        Ok(())
    }
}

impl Validate for ChangePasswordDto {
    fn validate(&self) -> Result<(), AppError> {
        if self.current_password.is_empty() {
            return Err(invalid("current_password is required"));
        }
        require_password("new_password", &self.new_password)
    }
}

impl Validate for CreateUserDto {
    fn validate(&self) -> Result<(), AppError> {
        require_email(&self.email)?;
        require_password("password", &self.password)?;
        require_text("first_name", &self.first_name, MAX_NAME_LEN)?;
        require_text("last_name", &self.last_name, MAX_NAME_LEN)?;
        optional_phone(self.phone.as_ref())
    }
}

impl Validate for UpdateUserDto {
    fn validate(&self) -> Result<(), AppError> {
        require_text("first_name", &self.first_name, MAX_NAME_LEN)?;
        require_text("last_name", &self.last_name, MAX_NAME_LEN)?;
        optional_phone(self.phone.as_ref())
    }
}

impl Validate for UpdateProfileDto {
    fn validate(&self) -> Result<(), AppError> {
        require_text("first_name", &self.first_name, MAX_NAME_LEN)?;
        require_text("last_name", &self.last_name, MAX_NAME_LEN)?;
        optional_phone(self.phone.as_ref())
    }
}

impl Validate for FacultyFormDto {
    fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name, MAX_TITLE_LEN)?;
        require_text("short_name", &self.short_name, 32)
    }
}

impl Validate for GroupFormDto {
    fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name, 64)?;
        require_course(self.course)
    }
}

impl Validate for DormitoryFormDto {
    fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name, MAX_TITLE_LEN)?;
        require_text("address", &self.address, 255)
    }
}

impl Validate for RoomFormDto {
    fn validate(&self) -> Result<(), AppError> {
        require_text("number", &self.number, 16)?;
        if self.capacity < 1 {
            return Err(invalid("capacity must be at least 1"));
        }
        if self.monthly_rent < 0 {
            return Err(invalid("monthly_rent must not be negative"));
        }
        Ok(())
    }
}

impl Validate for CreateApplicationDto {
    fn validate(&self) -> Result<(), AppError> {
        require_course(self.course)
    }
}

impl Validate for CreateReservationDto {
    fn validate(&self) -> Result<(), AppError> {
        if self.start_date >= self.end_date {
            return Err(invalid("start_date must be before end_date"));
        }
        Ok(())
    }
}

impl Validate for AgreementFormDto {
    fn validate(&self) -> Result<(), AppError> {
        if self.start_date >= self.end_date {
            return Err(invalid("start_date must be before end_date"));
        }
        require_text("passport_number", &self.passport_number, MAX_PASSPORT_LEN)
    }
}

impl Validate for ScheduleEntryFormDto {
    fn validate(&self) -> Result<(), AppError> {
        if self.start_time >= self.end_time {
            return Err(invalid("start_time must be before end_time"));
        }
        if let Some(course) = self.course {
            require_course(course)?;
        }
        Ok(())
    }
}

impl Validate for EventFormDto {
    fn validate(&self) -> Result<(), AppError> {
        require_text("title", &self.title, MAX_TITLE_LEN)?;
        if let Some(ends_at) = self.ends_at {
            if ends_at <= self.starts_at {
                return Err(invalid("ends_at must be after starts_at"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    use super::*;

    fn register() -> RegisterDto {
        RegisterDto {
            email: "student@uni.example".to_string(),
            password: "correct horse".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Byron".to_string(),
            phone: Some("+1 (555) 010-2030".to_string()),
            faculty_id: None,
            group_id: None,
        }
    }

    #[test]
    fn accepts_well_formed_registration() {
        assert!(register().validate().is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["", "no-at-sign", "@uni.example", "a@nodot", "a@.example", "a@b@c.d"] {
            let dto = RegisterDto {
                email: email.to_string(),
                ..register()
            };
            assert!(
                matches!(dto.validate(), Err(AppError::BadRequest(_))),
                "{} should be rejected",
                email
            );
        }
    }

    #[test]
    fn rejects_short_password() {
        let dto = RegisterDto {
            password: "short".to_string(),
            ..register()
        };
        assert!(matches!(dto.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn rejects_letters_in_phone() {
        let dto = RegisterDto {
            phone: Some("call me".to_string()),
            ..register()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_course_out_of_range() {
        let group = GroupFormDto {
            name: "CS-11".to_string(),
            course: 7,
        };
        assert!(group.validate().is_err());

        let application = CreateApplicationDto {
            faculty_id: None,
            dormitory_id: None,
            course: 0,
            comment: None,
        };
        assert!(application.validate().is_err());
    }

    #[test]
    fn rejects_empty_room_capacity() {
        let room = RoomFormDto {
            number: "101".to_string(),
            floor: 1,
            capacity: 0,
            monthly_rent: 1000,
            status: None,
        };
        assert!(room.validate().is_err());
    }

    #[test]
    fn rejects_inverted_date_ranges() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let reservation = CreateReservationDto {
            room_id: 1,
            start_date: date,
            end_date: date,
            comment: None,
        };
        assert!(reservation.validate().is_err());

        let entry = ScheduleEntryFormDto {
            dormitory_id: 1,
            faculty_id: None,
            course: None,
            date,
            start_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            note: None,
        };
        assert!(entry.validate().is_err());
    }

    #[test]
    fn event_must_end_after_it_starts() {
        let starts_at = Utc.with_ymd_and_hms(2026, 10, 1, 18, 0, 0).unwrap();
        let event = EventFormDto {
            title: "Welcome party".to_string(),
            description: None,
            location: None,
            starts_at,
            ends_at: Some(starts_at),
            dormitory_id: None,
        };
        assert!(event.validate().is_err());

        let open_ended = EventFormDto {
            ends_at: None,
            ..event
        };
        assert!(open_ended.validate().is_ok());
    }
}
