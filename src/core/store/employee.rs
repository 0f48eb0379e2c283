use crate::core::store::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub surname: String,
    /// `0` when the age is unknown.
    pub age: u32,
    pub department: String,
}

impl Employee {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        surname: impl Into<String>,
        age: u32,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            surname: surname.into(),
            age,
            department: department.into(),
        }
    }
}

impl Record for Employee {
    const KIND: &'static str = "employee";

    fn id(&self) -> i64 {
        self.id
    }

    fn is_valid(&self) -> bool {
        self.id > 0 && !self.name.trim().is_empty() && !self.department.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_age_is_still_valid() {
        assert!(Employee::new(3, "Ana", "Ruiz", 0, "IT").is_valid());
    }

    #[test]
    fn blank_department_is_invalid() {
        assert!(!Employee::new(3, "Ana", "Ruiz", 30, " ").is_valid());
        assert!(!Employee::new(0, "Ana", "Ruiz", 30, "IT").is_valid());
    }
}
