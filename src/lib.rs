pub mod calendar;
pub mod error;
pub mod parser;
pub mod segment;
pub mod span;
pub mod tenor;
pub mod tokenizer;

pub use calendar::{AddTenor, add_duration, subtract_duration};
pub use error::{ParseError, ParseErrorKind, TenorError};
pub use parser::{parse, try_parse};
pub use segment::Segment;
pub use span::Span;
pub use tenor::{Tenor, Unit};
pub use tokenizer::{SegmentTokenizer, Token, UNIT_SEPARATORS};
