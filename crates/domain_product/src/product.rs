//! Product record

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{FieldKind, FieldMapping, FieldRole, ProductId, Record, SqlValue};

/// A product as stored in the `products` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-generated identifier, absent until created
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price, exchanged as a JSON number
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    /// Units in stock
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl Product {
    /// Returns a copy carrying the given identifier
    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns a copy with the identifier removed
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }
}

static PRODUCT_FIELDS: [FieldMapping<Product>; 7] = [
    FieldMapping {
        field: "id",
        kind: FieldKind::BigInt,
        role: FieldRole::Identifier,
        get: |p| SqlValue::BigInt(p.id.map(|id| id.value())),
        set: |p, v| {
            p.id = v.into_big_int()?.map(ProductId::new);
            Ok(())
        },
    },
    FieldMapping {
        field: "name",
        kind: FieldKind::Text,
        role: FieldRole::Data,
        get: |p| SqlValue::Text(p.name.clone()),
        set: |p, v| {
            p.name = v.into_text()?;
            Ok(())
        },
    },
    FieldMapping {
        field: "description",
        kind: FieldKind::Text,
        role: FieldRole::Data,
        get: |p| SqlValue::Text(p.description.clone()),
        set: |p, v| {
            p.description = v.into_text()?;
            Ok(())
        },
    },
    FieldMapping {
        field: "price",
        kind: FieldKind::Decimal,
        role: FieldRole::Data,
        get: |p| SqlValue::Decimal(p.price),
        set: |p, v| {
            p.price = v.into_decimal()?;
            Ok(())
        },
    },
    FieldMapping {
        field: "category",
        kind: FieldKind::Text,
        role: FieldRole::Data,
        get: |p| SqlValue::Text(p.category.clone()),
        set: |p, v| {
            p.category = v.into_text()?;
            Ok(())
        },
    },
    FieldMapping {
        field: "stock",
        kind: FieldKind::BigInt,
        role: FieldRole::Data,
        get: |p| SqlValue::BigInt(p.stock),
        set: |p, v| {
            p.stock = v.into_big_int()?;
            Ok(())
        },
    },
    FieldMapping {
        field: "active",
        kind: FieldKind::Bool,
        role: FieldRole::Data,
        get: |p| SqlValue::Bool(p.active),
        set: |p, v| {
            p.active = v.into_bool()?;
            Ok(())
        },
    },
];

impl Record for Product {
    const ENTITY: &'static str = "Product";
    const TABLE: &'static str = "products";

    fn fields() -> &'static [FieldMapping<Self>] {
        &PRODUCT_FIELDS
    }

    fn identifier(&self) -> Option<i64> {
        self.id.map(|id| id.value())
    }

    fn assign_identifier(&mut self, id: i64) {
        self.id = Some(ProductId::new(id));
    }
}
