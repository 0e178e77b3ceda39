use chrono::NaiveDate;
use safiri_shared::{RawSearchInput, TripRequest};

/// Rejections the search form surfaces to the traveller. Each variant maps
/// to one translation key; only the first violated rule is reported per
/// attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Departure city is required")]
    MissingOrigin,

    #[error("Destination city is required")]
    MissingDestination,

    #[error("Departure and destination must be different cities")]
    SameCities,

    #[error("Travel date is required")]
    MissingDate,

    #[error("Passenger count is required")]
    MissingPassengers,

    #[error("Travel date is not a valid calendar date")]
    InvalidDate,

    #[error("Travel date is in the past")]
    PastDate,

    #[error("Passenger count must be a positive number")]
    InvalidPassengers,
}

impl ValidationError {
    /// Translation key the UI layer resolves into a localized message.
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::MissingOrigin => "selectDepartureError",
            ValidationError::MissingDestination => "selectDestinationError",
            ValidationError::SameCities => "differentCitiesError",
            ValidationError::MissingDate => "selectDateError",
            ValidationError::MissingPassengers => "selectPassengersError",
            ValidationError::InvalidDate => "invalidDateError",
            ValidationError::PastDate => "pastDateError",
            ValidationError::InvalidPassengers => "invalidPassengersError",
        }
    }
}

/// Validate raw form fields into a `TripRequest`, first failure wins.
///
/// Check order: origin present → destination present → origin ≠ destination
/// → date present → passenger count present, then date/count parse and range
/// checks. `today` is explicit so callers control the date boundary.
pub fn validate_search(
    raw: &RawSearchInput,
    today: NaiveDate,
) -> Result<TripRequest, ValidationError> {
    let origin = raw.from.trim();
    if origin.is_empty() {
        return Err(ValidationError::MissingOrigin);
    }

    let destination = raw.to.trim();
    if destination.is_empty() {
        return Err(ValidationError::MissingDestination);
    }

    if origin == destination {
        return Err(ValidationError::SameCities);
    }

    let date = raw.date.trim();
    if date.is_empty() {
        return Err(ValidationError::MissingDate);
    }

    let passengers = raw.passengers.trim();
    if passengers.is_empty() {
        return Err(ValidationError::MissingPassengers);
    }

    let departure_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate)?;
    if departure_date < today {
        return Err(ValidationError::PastDate);
    }

    let passenger_count: u32 = passengers
        .parse()
        .map_err(|_| ValidationError::InvalidPassengers)?;
    if passenger_count == 0 {
        return Err(ValidationError::InvalidPassengers);
    }

    Ok(TripRequest {
        origin: origin.to_string(),
        destination: destination.to_string(),
        departure_date,
        passenger_count,
    })
}
