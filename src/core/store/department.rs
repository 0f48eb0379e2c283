use crate::core::store::Record;

/// Department names offered by the form's pick list.
pub const DEPARTMENT_NAMES: [&str; 7] = [
    "Recursos Humanos",
    "Desarrollo",
    "Ventas",
    "Marketing",
    "IT",
    "Operaciones",
    "Finanzas",
];

pub fn is_known_department_name(name: &str) -> bool {
    DEPARTMENT_NAMES.contains(&name.trim())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub required_staff: i64,
    pub budget: f64,
    pub available_hours: f64,
}

impl Department {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        required_staff: i64,
        budget: f64,
        available_hours: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            required_staff,
            budget,
            available_hours,
        }
    }
}

impl Record for Department {
    const KIND: &'static str = "department";

    fn id(&self) -> i64 {
        self.id
    }

    /// Names outside [`DEPARTMENT_NAMES`] are accepted; only blank ones fail.
    fn is_valid(&self) -> bool {
        self.id > 0
            && !self.name.trim().is_empty()
            && self.required_staff >= 0
            && self.budget >= 0.0
            && self.available_hours >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_department() {
        assert!(Department::new(1000, "IT", 5, 10_000.0, 160.0).is_valid());
        assert!(Department::new(1, "Custom", 0, 0.0, 0.0).is_valid());
    }

    #[test]
    fn each_constraint_is_checked() {
        let base = Department::new(1, "IT", 1, 1.0, 1.0);
        let cases = [
            Department { id: 0, ..base.clone() },
            Department { id: -4, ..base.clone() },
            Department { name: "   ".into(), ..base.clone() },
            Department { required_staff: -1, ..base.clone() },
            Department { budget: -0.5, ..base.clone() },
            Department { available_hours: -1.0, ..base.clone() },
            Department { budget: f64::NAN, ..base.clone() },
        ];
        for case in cases {
            assert!(!case.is_valid(), "{case:?} should be invalid");
        }
    }

    #[test]
    fn known_names_ignore_surrounding_whitespace() {
        assert!(is_known_department_name(" Ventas "));
        assert!(!is_known_department_name("Logistica"));
    }
}
