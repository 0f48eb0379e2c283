use crate::core::{
    numbers::{parse_decimal, parse_int},
    store::{DEPARTMENT_NAMES, Department, Rejection},
};

/// Raw text of the department form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentForm {
    pub id: String,
    pub name: String,
    pub required_staff: String,
    pub budget: String,
    pub available_hours: String,
}

impl Default for DepartmentForm {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: DEPARTMENT_NAMES[0].to_string(),
            required_staff: String::new(),
            budget: String::new(),
            available_hours: String::new(),
        }
    }
}

impl DepartmentForm {
    pub fn from_department(department: &Department) -> Self {
        Self {
            id: department.id.to_string(),
            name: department.name.clone(),
            required_staff: department.required_staff.to_string(),
            budget: department.budget.to_string(),
            available_hours: department.available_hours.to_string(),
        }
    }

    /// Builds the candidate record. Unparseable numbers are rejected as
    /// invalid fields instead of being coerced to zero.
    pub fn to_candidate(&self) -> Result<Department, Rejection> {
        let candidate = Department {
            id: parse_int(&self.id).ok_or(Rejection::InvalidFields)?,
            name: self.name.trim().to_string(),
            required_staff: parse_int(&self.required_staff).ok_or(Rejection::InvalidFields)?,
            budget: parse_decimal(&self.budget).ok_or(Rejection::InvalidFields)?,
            available_hours: parse_decimal(&self.available_hours)
                .ok_or(Rejection::InvalidFields)?,
        };
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(id: &str, staff: &str, budget: &str, hours: &str) -> DepartmentForm {
        DepartmentForm {
            id: id.into(),
            name: "Ventas".into(),
            required_staff: staff.into(),
            budget: budget.into(),
            available_hours: hours.into(),
        }
    }

    #[test]
    fn accepts_comma_decimals() {
        let candidate = form(" 1234 ", "3", "2500,50", "37,5").to_candidate().unwrap();
        assert_eq!(candidate, Department::new(1234, "Ventas", 3, 2500.5, 37.5));
    }

    #[test]
    fn unparseable_numbers_are_invalid_fields() {
        assert_eq!(form("", "3", "1", "1").to_candidate(), Err(Rejection::InvalidFields));
        assert_eq!(form("12", "x", "1", "1").to_candidate(), Err(Rejection::InvalidFields));
        assert_eq!(form("12", "3", "", "1").to_candidate(), Err(Rejection::InvalidFields));
    }

    #[test]
    fn form_round_trips_a_department() {
        let department = Department::new(4321, "IT", 7, 100.25, 12.0);
        let candidate = DepartmentForm::from_department(&department).to_candidate();
        assert_eq!(candidate, Ok(department));
    }

    #[test]
    fn default_form_preselects_first_name() {
        assert_eq!(DepartmentForm::default().name, "Recursos Humanos");
    }
}
