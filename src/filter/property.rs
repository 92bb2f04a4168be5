use std::cmp::Ordering;

use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

use crate::database::models::Property;

use super::types::SortDirection;

/// Columns covered by the free-text `search_term`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Address,
    City,
    Area,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::Title,
        SearchField::Address,
        SearchField::City,
        SearchField::Area,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Address => "address",
            SearchField::City => "city",
            SearchField::Area => "area",
        }
    }

    fn value<'a>(&self, property: &'a Property) -> Option<&'a str> {
        match self {
            SearchField::Title => Some(&property.title),
            SearchField::Address => Some(&property.address),
            SearchField::City => Some(&property.city),
            SearchField::Area => property.area.as_deref(),
        }
    }
}

/// Exact-match filter; each variant maps to exactly one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyCondition {
    City(String),
    Area(String),
    PropertyType(String),
    ContractCreated(bool),
}

impl PropertyCondition {
    pub fn column(&self) -> &'static str {
        match self {
            PropertyCondition::City(_) => "city",
            PropertyCondition::Area(_) => "area",
            PropertyCondition::PropertyType(_) => "property_type",
            PropertyCondition::ContractCreated(_) => "is_contract_created",
        }
    }

    pub fn matches(&self, property: &Property) -> bool {
        match self {
            PropertyCondition::City(city) => &property.city == city,
            PropertyCondition::Area(area) => property.area.as_deref() == Some(area.as_str()),
            PropertyCondition::PropertyType(kind) => &property.property_type == kind,
            PropertyCondition::ContractCreated(flag) => property.is_contract_created == *flag,
        }
    }

    fn push_sql(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" AND ").push(self.column()).push(" = ");
        match self {
            PropertyCondition::City(v)
            | PropertyCondition::Area(v)
            | PropertyCondition::PropertyType(v) => {
                qb.push_bind(v.clone());
            }
            PropertyCondition::ContractCreated(flag) => {
                qb.push_bind(*flag);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertySortField {
    #[default]
    CreatedAt,
    Title,
    RentAmount,
}

impl PropertySortField {
    pub fn column(&self) -> &'static str {
        match self {
            PropertySortField::CreatedAt => "created_at",
            PropertySortField::Title => "title",
            PropertySortField::RentAmount => "rent_amount",
        }
    }

    fn compare(&self, a: &Property, b: &Property) -> Ordering {
        match self {
            PropertySortField::CreatedAt => a.created_at.cmp(&b.created_at),
            PropertySortField::Title => a.title.cmp(&b.title),
            PropertySortField::RentAmount => a.rent_amount.cmp(&b.rent_amount),
        }
    }
}

/// Query string accepted by `GET /properties/mine`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyListQuery {
    #[serde(alias = "searchTerm")]
    pub search_term: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub property_type: Option<String>,
    pub is_contract_created: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<PropertySortField>,
    pub sort_order: Option<SortDirection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    pub search_term: Option<String>,
    pub conditions: Vec<PropertyCondition>,
    pub sort_by: PropertySortField,
    pub sort_order: SortDirection,
}

impl PropertyFilter {
    /// Blank strings are treated as absent.
    pub fn from_query(query: &PropertyListQuery) -> Self {
        fn present(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        let mut conditions = Vec::new();
        if let Some(city) = present(&query.city) {
            conditions.push(PropertyCondition::City(city));
        }
        if let Some(area) = present(&query.area) {
            conditions.push(PropertyCondition::Area(area));
        }
        if let Some(kind) = present(&query.property_type) {
            conditions.push(PropertyCondition::PropertyType(kind));
        }
        if let Some(flag) = query.is_contract_created {
            conditions.push(PropertyCondition::ContractCreated(flag));
        }

        Self {
            search_term: present(&query.search_term),
            conditions,
            sort_by: query.sort_by.unwrap_or_default(),
            sort_order: query.sort_order.unwrap_or_default(),
        }
    }

    pub fn matches(&self, property: &Property) -> bool {
        if let Some(term) = &self.search_term {
            let needle = term.to_lowercase();
            let hit = SearchField::ALL.iter().any(|field| {
                field
                    .value(property)
                    .is_some_and(|v| v.to_lowercase().contains(&needle))
            });
            if !hit {
                return false;
            }
        }
        self.conditions.iter().all(|c| c.matches(property))
    }

    /// Appends ` AND ...` clauses; the builder must already hold a WHERE.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(term) = &self.search_term {
            let pattern = format!("%{}%", escape_like(term));
            qb.push(" AND (");
            {
                let mut any = qb.separated(" OR ");
                for field in SearchField::ALL {
                    any.push(format!("{} ILIKE ", field.column()));
                    any.push_bind_unseparated(pattern.clone());
                }
            }
            qb.push(")");
        }
        for condition in &self.conditions {
            condition.push_sql(qb);
        }
    }

    pub fn push_order(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" ORDER BY ")
            .push(self.sort_by.column())
            .push(" ")
            .push(self.sort_order.to_sql());
    }

    pub fn compare(&self, a: &Property, b: &Property) -> Ordering {
        let ord = self.sort_by.compare(a, b);
        match self.sort_order {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
