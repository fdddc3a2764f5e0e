pub mod costs;
pub mod flip;
pub mod recommend;
pub mod risk;
