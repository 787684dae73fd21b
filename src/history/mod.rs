//! Rolling history of spoken lines and the cursor used to browse it

mod cursor;
mod ring;

pub use cursor::NavigationCursor;
pub use ring::{HistoryRing, HISTORY_LEN};
