//! Price providers for the pairs backtester.

mod align;
mod csv_source;
mod memory;

pub use align::align;
pub use csv_source::CsvPriceProvider;
pub use memory::InMemoryPriceProvider;
