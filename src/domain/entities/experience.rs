use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, FieldError};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkExperience {
    pub id: i32,
    pub companyname: String,
    pub jobtitle: String,
    pub location: String,
    pub startdate: NaiveDate,
    pub enddate: NaiveDate,
    pub description: String,
}

/// A fully validated row, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkExperienceInsert {
    pub companyname: String,
    pub jobtitle: String,
    pub location: String,
    pub startdate: NaiveDate,
    pub enddate: NaiveDate,
    pub description: String,
}

/// Business fields of a work experience, in the order errors are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ExperienceField {
    #[display("companyname")]
    CompanyName,
    #[display("jobtitle")]
    JobTitle,
    #[display("location")]
    Location,
    #[display("startdate")]
    StartDate,
    #[display("enddate")]
    EndDate,
    #[display("description")]
    Description,
}

impl ExperienceField {
    pub const ALL: [ExperienceField; 6] = [
        ExperienceField::CompanyName,
        ExperienceField::JobTitle,
        ExperienceField::Location,
        ExperienceField::StartDate,
        ExperienceField::EndDate,
        ExperienceField::Description,
    ];

    /// Position of a field by wire name; unknown names sort last.
    pub fn position(name: &str) -> usize {
        Self::ALL
            .iter()
            .position(|field| field.to_string() == name)
            .unwrap_or(Self::ALL.len())
    }
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewWorkExperience {
    #[validate(
        required(message = "companyname is required"),
        length(min = 1, message = "companyname is required")
    )]
    pub companyname: Option<String>,

    #[validate(
        required(message = "jobtitle is required"),
        length(min = 1, message = "jobtitle is required")
    )]
    pub jobtitle: Option<String>,

    #[validate(
        required(message = "location is required"),
        length(min = 1, message = "location is required")
    )]
    pub location: Option<String>,

    #[validate(
        required(message = "startdate is required"),
        length(min = 1, message = "startdate is required")
    )]
    pub startdate: Option<String>,

    #[validate(
        required(message = "enddate is required"),
        length(min = 1, message = "enddate is required")
    )]
    pub enddate: Option<String>,

    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description is required")
    )]
    pub description: Option<String>,
}

/// Full-row replacement. Presence is not checked here: a missing value is
/// written as NULL and the table's NOT NULL constraint rejects it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateWorkExperience {
    pub companyname: Option<String>,
    pub jobtitle: Option<String>,
    pub location: Option<String>,
    pub startdate: Option<NaiveDate>,
    pub enddate: Option<NaiveDate>,
    pub description: Option<String>,
}

impl NewWorkExperience {
    /// Reports every missing or empty field, in declaration order.
    pub fn validate_fields(&self) -> Result<(), AppError> {
        self.validate().map_err(|errors| match AppError::from(errors) {
            AppError::ValidationError(mut fields) => {
                fields.sort_by_key(|f| ExperienceField::position(&f.field));
                AppError::ValidationError(fields)
            }
            other => other,
        })
    }
}

fn parse_date(
    field: ExperienceField,
    value: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    let value = value?;
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(FieldError::new(
                field.to_string(),
                format!("{} must be a valid date (YYYY-MM-DD)", field),
            ));
            None
        }
    }
}

impl TryFrom<NewWorkExperience> for WorkExperienceInsert {
    type Error = AppError;

    fn try_from(request: NewWorkExperience) -> Result<Self, Self::Error> {
        let mut errors = match request.validate_fields() {
            Ok(()) => Vec::new(),
            Err(AppError::ValidationError(fields)) => fields,
            Err(other) => return Err(other),
        };

        // Missing dates are already reported above
        let startdate = parse_date(
            ExperienceField::StartDate,
            request.startdate.as_deref().filter(|s| !s.is_empty()),
            &mut errors,
        );
        let enddate = parse_date(
            ExperienceField::EndDate,
            request.enddate.as_deref().filter(|s| !s.is_empty()),
            &mut errors,
        );
        errors.sort_by_key(|f| ExperienceField::position(&f.field));

        match (startdate, enddate) {
            (Some(startdate), Some(enddate)) if errors.is_empty() => Ok(WorkExperienceInsert {
                companyname: request.companyname.unwrap_or_default(),
                jobtitle: request.jobtitle.unwrap_or_default(),
                location: request.location.unwrap_or_default(),
                startdate,
                enddate,
                description: request.description.unwrap_or_default(),
            }),
            _ => Err(AppError::ValidationError(errors)),
        }
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceCreatedResponse {
    pub message: String,
    pub new_experience: WorkExperience,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceUpdatedResponse {
    pub message: String,
    pub updated_experience: WorkExperience,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExperienceDeletedResponse {
    pub message: String,
    pub deleted: WorkExperience,
}
