//! Example: bulk range transfer against a live Excel.
//!
//! This demonstrates:
//! 1. Writing a 2x5 block of cells in one call
//! 2. Reading it back as a grid
//! 3. Toggling font attributes and alignment on a cell
//! 4. Copying and renaming a worksheet
//!
//! Prerequisites:
//!   - WINE installed and in PATH
//!   - Microsoft Excel installed in the WINE prefix
//!   - xlauto-host.exe next to this binary, or XLAUTO_HOST pointing at it
//!
//! Run:
//!   cargo run --example range_transfer -p xlauto -- /path/to/book.xls

use std::path::PathBuf;

use xlauto::{Application, HorizontalAlignment, HostConfig, Rgb, VerticalAlignment};

const DATA: &str = "2#5#3#abc2#de4#fghi1#34#52352#234#53530#4#32532#32";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: range_transfer <workbook>")?;

    let config = HostConfig {
        host_exe_path: std::env::var_os("XLAUTO_HOST").map(PathBuf::from),
        ..HostConfig::default()
    };

    println!("Starting Excel...");
    let app = Application::start(config)?;
    {
        let book = app.open_workbook(&path)?;
        let sheet = book.active_worksheet()?;
        println!("Active worksheet: {}", sheet.name()?);

        println!("Writing F16:J17...");
        let range = sheet.range("F16:J17")?;
        range.write_data(DATA)?;

        let grid = range.read_grid()?;
        println!("Read back {}x{}:", grid.rows(), grid.columns());
        println!("{grid}");

        let cell = sheet.cell("D4")?;
        println!("D4 = {:?}", cell.value()?);
        cell.set_value(42)?;
        cell.set_horizontal_alignment(HorizontalAlignment::Center)?;
        cell.set_vertical_alignment(VerticalAlignment::Top)?;

        let font = cell.font()?;
        println!(
            "D4 font: {} {}pt bold={}",
            font.name()?,
            font.size()?,
            font.bold()?
        );
        font.set_bold(!font.bold()?)?;
        font.set_color(Rgb::RED)?;

        let sheets = book.worksheets();
        println!("Workbook has {} worksheets", sheets.count()?);
        sheet.copy(true)?;
        book.active_worksheet()?.set_name("Copy")?;

        book.save()?;
        book.close()?;
    }
    app.shutdown()?;

    println!("Done.");
    Ok(())
}
