//! Business value - closed catalog of the value a story delivers
//!
//! Business values are never built from arbitrary input. Every legal
//! instance is one of the constants below, and lookups go through
//! [`BusinessValue::from_id`].

/// A member of the business value catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusinessValue {
    id: i32,
    description: &'static str,
}

impl BusinessValue {
    pub const BV0: BusinessValue = BusinessValue::entry(0, "Business Value 0");
    pub const BV1: BusinessValue = BusinessValue::entry(1, "Business Value 1");
    pub const BV100: BusinessValue = BusinessValue::entry(100, "Business Value 100");
    pub const BV200: BusinessValue = BusinessValue::entry(200, "Business Value 200");
    pub const BV300: BusinessValue = BusinessValue::entry(300, "Business Value 300");
    pub const BV400: BusinessValue = BusinessValue::entry(400, "Business Value 400");
    pub const BV500: BusinessValue = BusinessValue::entry(500, "Business Value 500");
    pub const BV600: BusinessValue = BusinessValue::entry(600, "Business Value 600");
    pub const BV700: BusinessValue = BusinessValue::entry(700, "Business Value 700");
    pub const BV800: BusinessValue = BusinessValue::entry(800, "Business Value 800");
    pub const BV900: BusinessValue = BusinessValue::entry(900, "Business Value 900");
    pub const BV1000: BusinessValue = BusinessValue::entry(1000, "Business Value 1000");

    const fn entry(id: i32, description: &'static str) -> Self {
        Self { id, description }
    }

    /// The full catalog, in ascending id order
    pub fn all_values() -> &'static [BusinessValue] {
        const ALL: [BusinessValue; 12] = [
            BusinessValue::BV0,
            BusinessValue::BV1,
            BusinessValue::BV100,
            BusinessValue::BV200,
            BusinessValue::BV300,
            BusinessValue::BV400,
            BusinessValue::BV500,
            BusinessValue::BV600,
            BusinessValue::BV700,
            BusinessValue::BV800,
            BusinessValue::BV900,
            BusinessValue::BV1000,
        ];
        &ALL
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::all_values().iter().copied().find(|v| v.id == id)
    }

    pub fn is_member(id: i32) -> bool {
        Self::from_id(id).is_some()
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}
