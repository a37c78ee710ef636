use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{HrError, HrResult};

pub type EmployeeId = u64;

const HIRE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    #[serde(default)]
    pub phone: String,
    pub hire_date: NaiveDate,
}

/// Creation payload: an employee without an id.
///
/// Every field is optional on the wire so that validation can report all
/// missing required fields at once instead of failing on the first one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
}

impl NewEmployee {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        position: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            position: Some(position.into()),
            department: Some(department.into()),
            ..Self::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_hire_date(mut self, hire_date: impl Into<String>) -> Self {
        self.hire_date = Some(hire_date.into());
        self
    }

    /// Validate the payload and build the record it describes.
    ///
    /// A blank or absent `hireDate` falls back to `today`.
    pub(crate) fn into_employee(self, id: EmployeeId, today: NaiveDate) -> HrResult<Employee> {
        let missing: Vec<&'static str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("position", &self.position),
            ("department", &self.department),
        ]
        .into_iter()
        .filter(|(_, value)| non_blank(value.as_deref()).is_none())
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(HrError::MissingFields(missing));
        }

        let hire_date = match non_blank(self.hire_date.as_deref()) {
            Some(raw) => parse_hire_date(raw)?,
            None => today,
        };

        Ok(Employee {
            id,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            position: self.position.unwrap_or_default(),
            department: self.department.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            hire_date,
        })
    }
}

/// A single field of a partial update.
///
/// An absent JSON key and an explicit `null` both decode to [`Patch::Unset`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Unset,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Self::Unset => None,
            Self::Value(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_none(),
            Self::Value(value) => value.serialize(serializer),
        }
    }
}

/// Update payload.
///
/// A field changes only when it carries a value that is valid for it. Blank
/// is never a valid name, email, position, department or hire date, so those
/// keep their stored value; blank is a valid phone and clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub email: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub position: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub department: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub phone: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub hire_date: Patch<String>,
}

impl EmployeePatch {
    /// Merge into `employee`. Nothing is written unless the whole patch is valid.
    pub(crate) fn apply_to(&self, employee: &mut Employee) -> HrResult<()> {
        let hire_date = match non_blank(self.hire_date.as_value().map(String::as_str)) {
            Some(raw) => Some(parse_hire_date(raw)?),
            None => None,
        };

        for (slot, patch) in [
            (&mut employee.name, &self.name),
            (&mut employee.email, &self.email),
            (&mut employee.position, &self.position),
            (&mut employee.department, &self.department),
        ] {
            if let Some(value) = non_blank(patch.as_value().map(String::as_str)) {
                *slot = value.to_string();
            }
        }
        if let Patch::Value(phone) = &self.phone {
            employee.phone = phone.clone();
        }
        if let Some(hire_date) = hire_date {
            employee.hire_date = hire_date;
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_hire_date(raw: &str) -> HrResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), HIRE_DATE_FORMAT)
        .map_err(|_| HrError::InvalidHireDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, HIRE_DATE_FORMAT).unwrap()
    }

    fn sample() -> Employee {
        Employee {
            id: 1,
            name: "John Doe".into(),
            email: "john.doe@company.com".into(),
            position: "Software Engineer".into(),
            department: "Engineering".into(),
            phone: "(555) 123-4567".into(),
            hire_date: date("2023-01-15"),
        }
    }

    #[test]
    fn employee_uses_camel_case_on_the_wire() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["hireDate"], json!("2023-01-15"));
        assert!(value.get("hire_date").is_none());
    }

    #[test]
    fn absent_and_null_decode_to_unset() {
        let patch: EmployeePatch =
            serde_json::from_value(json!({ "name": null, "phone": "" })).unwrap();
        assert_eq!(patch.name, Patch::Unset);
        assert_eq!(patch.email, Patch::Unset);
        assert_eq!(patch.phone, Patch::Value(String::new()));
    }

    #[test]
    fn unset_fields_are_not_serialized() {
        let patch = EmployeePatch {
            position: Patch::Value("Staff Engineer".into()),
            ..EmployeePatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "position": "Staff Engineer" })
        );
    }

    #[test]
    fn new_employee_reports_every_missing_field() {
        let payload = NewEmployee {
            name: Some("A".into()),
            email: Some("   ".into()),
            ..NewEmployee::default()
        };
        let err = payload.into_employee(9, date("2024-05-01")).unwrap_err();
        assert_eq!(
            err,
            HrError::MissingFields(vec!["email", "position", "department"])
        );
    }

    #[test]
    fn new_employee_fills_defaults() {
        let today = date("2024-05-01");
        let employee = NewEmployee::new("A", "a@x.com", "P", "D")
            .with_hire_date("")
            .into_employee(4, today)
            .unwrap();
        assert_eq!(employee.id, 4);
        assert_eq!(employee.phone, "");
        assert_eq!(employee.hire_date, today);
    }

    #[test]
    fn new_employee_rejects_malformed_hire_date() {
        let err = NewEmployee::new("A", "a@x.com", "P", "D")
            .with_hire_date("15/01/2023")
            .into_employee(4, date("2024-05-01"))
            .unwrap_err();
        assert_eq!(err, HrError::InvalidHireDate("15/01/2023".into()));
    }

    #[test]
    fn blank_required_values_keep_stored_values() {
        let mut employee = sample();
        let patch = EmployeePatch {
            name: Patch::Value(String::new()),
            department: Patch::Value("Platform".into()),
            hire_date: Patch::Value(" ".into()),
            ..EmployeePatch::default()
        };
        patch.apply_to(&mut employee).unwrap();
        assert_eq!(employee.name, "John Doe");
        assert_eq!(employee.department, "Platform");
        assert_eq!(employee.hire_date, date("2023-01-15"));
    }

    #[test]
    fn empty_phone_clears_the_phone() {
        let mut employee = sample();
        let patch = EmployeePatch {
            phone: Patch::Value(String::new()),
            ..EmployeePatch::default()
        };
        patch.apply_to(&mut employee).unwrap();
        assert_eq!(employee.phone, "");
    }

    #[test]
    fn invalid_patch_leaves_record_untouched() {
        let mut employee = sample();
        let patch = EmployeePatch {
            name: Patch::Value("Johnny".into()),
            hire_date: Patch::Value("yesterday".into()),
            ..EmployeePatch::default()
        };
        assert!(patch.apply_to(&mut employee).is_err());
        assert_eq!(employee, sample());
    }
}
