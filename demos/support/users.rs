//! Sample employees shared by the demos.

use tabula::widgets::data_table::{Align, Column};
use tabula::widgets::record::{Record, Value};

#[derive(Debug, Clone)]
pub struct User {
    pub id: u32,
    pub name: &'static str,
    pub email: &'static str,
    pub role: &'static str,
    pub status: &'static str,
    pub join_date: &'static str,
    pub salary: u32,
}

impl Record for User {
    fn field(&self, name: &str) -> Option<Value> {
        Some(match name {
            "id" => self.id.into(),
            "name" => self.name.into(),
            "email" => self.email.into(),
            "role" => self.role.into(),
            "status" => self.status.into(),
            "joinDate" => self.join_date.into(),
            "salary" => self.salary.into(),
            _ => return None,
        })
    }
}

pub fn sample_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "John Doe",
            email: "john.doe@example.com",
            role: "Developer",
            status: "active",
            join_date: "2023-01-15",
            salary: 75000,
        },
        User {
            id: 2,
            name: "Jane Smith",
            email: "jane.smith@example.com",
            role: "Designer",
            status: "active",
            join_date: "2023-02-20",
            salary: 68000,
        },
        User {
            id: 3,
            name: "Bob Johnson",
            email: "bob.johnson@example.com",
            role: "Manager",
            status: "inactive",
            join_date: "2022-11-10",
            salary: 85000,
        },
        User {
            id: 4,
            name: "Alice Brown",
            email: "alice.brown@example.com",
            role: "Developer",
            status: "pending",
            join_date: "2023-03-05",
            salary: 72000,
        },
        User {
            id: 5,
            name: "Charlie Wilson",
            email: "charlie.wilson@example.com",
            role: "QA Engineer",
            status: "active",
            join_date: "2023-01-30",
            salary: 65000,
        },
    ]
}

/// Name, email, role, status and salary, all sortable.
pub fn user_columns() -> Vec<Column<User>> {
    vec![
        Column::new("name", "Name").sortable(true),
        Column::new("email", "Email").sortable(true),
        Column::new("role", "Role").sortable(true),
        Column::new("status", "Status").sortable(true),
        Column::new("salary", "Salary").sortable(true).align(Align::Right),
    ]
}

/// Salary as `$75,000`.
pub fn money(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => {
            let digits = format!("{}", *n as u64);
            let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
            for (i, c) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    out.push(',');
                }
                out.push(c);
            }
            format!("${out}")
        }
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
