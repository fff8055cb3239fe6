//! Value objects - immutable types that represent domain concepts

mod channel_type;
mod partials;
mod snowflake;

pub use channel_type::ChannelType;
pub use partials::Partials;
pub use snowflake::{Snowflake, SnowflakeParseError};
