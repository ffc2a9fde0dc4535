//! Employee record

use serde::{Deserialize, Serialize};

use core_kernel::{EmployeeId, FieldKind, FieldMapping, FieldRole, Record, SqlValue};

/// An employee as stored in the `employees` table
///
/// `hire_date` is deliberately kept as free text; it is stored and echoed
/// back exactly as supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Server-generated identifier, absent until created
    #[serde(default)]
    pub id: Option<EmployeeId>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department_id: Option<String>,
    #[serde(default)]
    pub hire_date: Option<String>,
}

impl Employee {
    /// Returns a copy carrying the given identifier
    pub fn with_id(mut self, id: EmployeeId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns a copy with the identifier removed
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }
}

static EMPLOYEE_FIELDS: [FieldMapping<Employee>; 6] = [
    FieldMapping {
        field: "id",
        kind: FieldKind::BigInt,
        role: FieldRole::Identifier,
        get: |e| SqlValue::BigInt(e.id.map(|id| id.value())),
        set: |e, v| {
            e.id = v.into_big_int()?.map(EmployeeId::new);
            Ok(())
        },
    },
    FieldMapping {
        field: "firstName",
        kind: FieldKind::Text,
        role: FieldRole::Data,
        get: |e| SqlValue::Text(e.first_name.clone()),
        set: |e, v| {
            e.first_name = v.into_text()?;
            Ok(())
        },
    },
    FieldMapping {
        field: "lastName",
        kind: FieldKind::Text,
        role: FieldRole::Data,
        get: |e| SqlValue::Text(e.last_name.clone()),
        set: |e, v| {
            e.last_name = v.into_text()?;
            Ok(())
        },
    },
    FieldMapping {
        field: "email",
        kind: FieldKind::Text,
        role: FieldRole::Data,
        get: |e| SqlValue::Text(e.email.clone()),
        set: |e, v| {
            e.email = v.into_text()?;
            Ok(())
        },
    },
    FieldMapping {
        field: "departmentId",
        kind: FieldKind::Text,
        role: FieldRole::Data,
        get: |e| SqlValue::Text(e.department_id.clone()),
        set: |e, v| {
            e.department_id = v.into_text()?;
            Ok(())
        },
    },
    FieldMapping {
        field: "hireDate",
        kind: FieldKind::Text,
        role: FieldRole::Data,
        get: |e| SqlValue::Text(e.hire_date.clone()),
        set: |e, v| {
            e.hire_date = v.into_text()?;
            Ok(())
        },
    },
];

impl Record for Employee {
    const ENTITY: &'static str = "Employee";
    const TABLE: &'static str = "employees";

    fn fields() -> &'static [FieldMapping<Self>] {
        &EMPLOYEE_FIELDS
    }

    fn identifier(&self) -> Option<i64> {
        self.id.map(|id| id.value())
    }

    fn assign_identifier(&mut self, id: i64) {
        self.id = Some(EmployeeId::new(id));
    }
}
