//! Address tuples used as the key for community codes.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

/// The five fields making up an address tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Country,
    Province,
    City,
    Street,
    StreetNumber,
}

impl AddressField {
    /// Field name as exposed in JSON payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Province => "province",
            Self::City => "city",
            Self::Street => "street",
            Self::StreetNumber => "streetNumber",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors raised by [`AddressTuple::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressValidationError {
    /// A field was missing or blank once trimmed.
    EmptyField(AddressField),
    /// The street number contained something other than ASCII digits.
    NonNumericStreetNumber,
}

impl AddressValidationError {
    /// Field that failed validation.
    pub fn field(&self) -> AddressField {
        match self {
            Self::EmptyField(field) => *field,
            Self::NonNumericStreetNumber => AddressField::StreetNumber,
        }
    }
}

impl fmt::Display for AddressValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
            Self::NonNumericStreetNumber => write!(f, "streetNumber must contain only digits"),
        }
    }
}

impl std::error::Error for AddressValidationError {}

/// Physical location key: `{country, province, city, street, street_number}`.
///
/// ## Invariants
/// - Every field is trimmed and non-empty.
/// - `street_number` contains ASCII digits only.
///
/// Values are kept with their original casing; lookups compare them
/// exactly.
///
/// # Examples
/// ```
/// use marketplace::domain::AddressTuple;
///
/// let address = AddressTuple::try_from_parts("España", "Andalucía", "Sevilla", "Gran Vía", "7")
///     .expect("valid address");
/// assert_eq!(address.street_number(), "7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressTuple {
    #[schema(example = "España")]
    country: String,
    #[schema(example = "Andalucía")]
    province: String,
    #[schema(example = "Sevilla")]
    city: String,
    #[schema(example = "Gran Vía")]
    street: String,
    #[schema(example = "7")]
    street_number: String,
}

impl AddressTuple {
    /// Validate raw inputs and build an address tuple.
    pub fn try_from_parts(
        country: &str,
        province: &str,
        city: &str,
        street: &str,
        street_number: &str,
    ) -> Result<Self, AddressValidationError> {
        let country = required(country, AddressField::Country)?;
        let province = required(province, AddressField::Province)?;
        let city = required(city, AddressField::City)?;
        let street = required(street, AddressField::Street)?;
        let street_number = required(street_number, AddressField::StreetNumber)?;
        if !street_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(AddressValidationError::NonNumericStreetNumber);
        }

        Ok(Self {
            country,
            province,
            city,
            street,
            street_number,
        })
    }

    pub fn country(&self) -> &str {
        self.country.as_str()
    }

    pub fn province(&self) -> &str {
        self.province.as_str()
    }

    pub fn city(&self) -> &str {
        self.city.as_str()
    }

    pub fn street(&self) -> &str {
        self.street.as_str()
    }

    pub fn street_number(&self) -> &str {
        self.street_number.as_str()
    }
}

fn required(value: &str, field: AddressField) -> Result<String, AddressValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AddressValidationError::EmptyField(field));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(["", "Andalucía", "Sevilla", "Gran Vía", "7"], AddressField::Country)]
    #[case(["España", " ", "Sevilla", "Gran Vía", "7"], AddressField::Province)]
    #[case(["España", "Andalucía", "", "Gran Vía", "7"], AddressField::City)]
    #[case(["España", "Andalucía", "Sevilla", "\t", "7"], AddressField::Street)]
    #[case(["España", "Andalucía", "Sevilla", "Gran Vía", ""], AddressField::StreetNumber)]
    fn rejects_blank_fields(#[case] parts: [&str; 5], #[case] field: AddressField) {
        let [country, province, city, street, number] = parts;
        let err = AddressTuple::try_from_parts(country, province, city, street, number)
            .expect_err("blank field must fail");
        assert_eq!(err, AddressValidationError::EmptyField(field));
        assert_eq!(err.field(), field);
    }

    #[rstest]
    #[case("7B")]
    #[case("-7")]
    #[case("1 2")]
    fn rejects_non_numeric_street_numbers(#[case] number: &str) {
        let err = AddressTuple::try_from_parts("España", "Andalucía", "Sevilla", "Gran Vía", number)
            .expect_err("non-numeric number must fail");
        assert_eq!(err, AddressValidationError::NonNumericStreetNumber);
    }

    #[rstest]
    fn trims_but_preserves_case() {
        let address =
            AddressTuple::try_from_parts(" España ", "andalucía", "SEVILLA", " Gran Vía", "07 ")
                .expect("valid address");
        assert_eq!(address.country(), "España");
        assert_eq!(address.province(), "andalucía");
        assert_eq!(address.city(), "SEVILLA");
        assert_eq!(address.street(), "Gran Vía");
        assert_eq!(address.street_number(), "07");
    }

    #[rstest]
    fn serialises_camel_case() {
        let address =
            AddressTuple::try_from_parts("España", "Andalucía", "Sevilla", "Gran Vía", "7")
                .expect("valid address");
        let value = serde_json::to_value(&address).expect("serialise address");
        assert_eq!(value["streetNumber"], "7");
        assert_eq!(value["country"], "España");
    }
}
