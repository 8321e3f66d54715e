//! Application services

mod assert_exists;

pub use assert_exists::{
    AssertGrowingUnitExists, AssertLocationExists, AssertPlantExists, AssertSpeciesExists,
};
