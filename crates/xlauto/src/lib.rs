//! Excel automation client with single-call bulk range transfer.
//!
//! This crate drives Excel through an automation host process (a Windows
//! executable, run under WINE on Linux) over JSON-over-stdio. It exposes the
//! Excel object model as ordinary Rust values: each handle owns one object in
//! the host and releases it when dropped.
//!
//! Range contents move in one call as an encoded string (see
//! [`xlauto_codec`]), not one call per cell.
//!
//! # Architecture
//!
//! ```text
//! Your Rust code
//!     └── Application (this crate)
//!           └── AutomationHost (StdioHost)
//!                 └── spawns: wine xlauto-host.exe
//!                       └── Excel.Application
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use xlauto::{Application, Grid, HostConfig, Rgb};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = Application::start(HostConfig::default())?;
//!     {
//!         let book = app.open_workbook("report.xls")?;
//!         let sheet = book.active_worksheet()?;
//!         println!("Active worksheet: {}", sheet.name()?);
//!
//!         let range = sheet.range("F16:J17")?;
//!         range.write_data("2#5#3#abc2#de4#fghi1#34#52352#234#53530#4#32532#32")?;
//!         let grid: Grid = range.read_grid()?;
//!         println!("{grid}");
//!
//!         let font = range.font()?;
//!         font.set_bold(!font.bold()?)?;
//!         font.set_color(Rgb::RED)?;
//!
//!         book.save()?;
//!         book.close()?;
//!     }
//!     app.shutdown()?;
//!     Ok(())
//! }
//! ```

mod address;
mod application;
mod constants;
mod error;
mod font;
mod host;
mod object;
mod range;
mod workbook;
mod worksheet;

pub use address::{CellRef, RangeRef, MAX_COLS, MAX_ROWS};
pub use application::Application;
pub use constants::{FileFormat, HorizontalAlignment, Rgb, VerticalAlignment};
pub use error::{AutomationError, Result};
pub use font::Font;
pub use host::{linux_to_wine_path, AutomationHost, HostConfig, StdioHost};
pub use range::{Cell, Range};
pub use workbook::{Workbook, Worksheets};
pub use worksheet::Worksheet;

pub use xlauto_codec::{decode, encode, DecodeError, Grid};
pub use xlauto_protocol::{CellValue, Command, FontProperty, ObjectId, ResponseData};
