//! In-memory automation host for integration tests.
//!
//! Models just enough of Excel (workbooks, sheets, cell values, fonts and
//! alignment) to drive the object model without a real host process. Every
//! command is recorded so tests can assert on the traffic.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use xlauto::{
    decode, encode, AutomationError, AutomationHost, CellRef, CellValue, Command, FontProperty,
    Grid, ObjectId, RangeRef, ResponseData, Result,
};

#[derive(Debug, Clone, PartialEq)]
pub struct FontState {
    pub name: String,
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub color: f64,
}

impl Default for FontState {
    fn default() -> Self {
        Self {
            name: "Arial".to_string(),
            size: 10.0,
            bold: false,
            italic: false,
            color: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SheetState {
    pub name: String,
    pub cells: HashMap<CellRef, CellValue>,
    pub fonts: HashMap<CellRef, FontState>,
    pub horizontal: HashMap<CellRef, i32>,
    pub vertical: HashMap<CellRef, i32>,
    pub merges: Vec<(String, bool)>,
}

impl SheetState {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn value(&self, cell: &str) -> CellValue {
        let cell = CellRef::parse(cell).expect("valid cell");
        self.cells.get(&cell).cloned().unwrap_or(CellValue::Null)
    }
}

#[derive(Debug, Clone)]
pub struct WorkbookState {
    pub path: String,
    pub sheets: Vec<SheetState>,
    pub active: usize,
    pub saves: usize,
    pub saved_as: Option<(String, i32)>,
    pub open: bool,
}

impl WorkbookState {
    fn new(path: String) -> Self {
        Self {
            path,
            sheets: vec![
                SheetState::named("Sheet1"),
                SheetState::named("Sheet2"),
                SheetState::named("Sheet3"),
            ],
            active: 0,
            saves: 0,
            saved_as: None,
            open: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Object {
    Workbook(usize),
    Sheet(usize, usize),
    Range(usize, usize, RangeRef),
    Font(usize, usize, RangeRef),
}

#[derive(Debug, Default)]
pub struct State {
    pub commands: Vec<Command>,
    pub workbooks: Vec<WorkbookState>,
    pub released: Vec<ObjectId>,
    pub visible: Option<bool>,
    pub shut_down: bool,
    /// Fail the next command whose name starts with this string.
    pub fail_on: Option<&'static str>,
    /// Replace the payload of the next ReadRange.
    pub read_override: Option<String>,
    objects: HashMap<ObjectId, Object>,
    next_object: u64,
}

impl State {
    /// Objects handed out and not yet released or consumed.
    pub fn live_objects(&self) -> usize {
        self.objects.len()
    }

    pub fn count(&self, pred: impl Fn(&Command) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    fn add(&mut self, object: Object) -> Option<ResponseData> {
        self.next_object += 1;
        let id = ObjectId(self.next_object);
        self.objects.insert(id, object);
        Some(ResponseData::Object { object: id })
    }

    fn lookup(&self, id: ObjectId) -> Result<Object> {
        self.objects
            .get(&id)
            .copied()
            .ok_or_else(|| AutomationError::Host(format!("unknown object {id}")))
    }

    fn sheet_mut(&mut self, book: usize, sheet: usize) -> &mut SheetState {
        &mut self.workbooks[book].sheets[sheet]
    }

    fn range_of(&self, id: ObjectId) -> Result<(usize, usize, RangeRef)> {
        match self.lookup(id)? {
            Object::Range(b, s, r) => Ok((b, s, r)),
            _ => Err(AutomationError::Host(format!("{id} is not a range"))),
        }
    }

    fn workbook_of(&self, id: ObjectId) -> Result<usize> {
        match self.lookup(id)? {
            Object::Workbook(b) => Ok(b),
            _ => Err(AutomationError::Host(format!("{id} is not a workbook"))),
        }
    }

    fn sheet_of(&self, id: ObjectId) -> Result<(usize, usize)> {
        match self.lookup(id)? {
            Object::Sheet(b, s) => Ok((b, s)),
            _ => Err(AutomationError::Host(format!("{id} is not a worksheet"))),
        }
    }

    fn execute(&mut self, command: Command) -> Result<Option<ResponseData>> {
        match command {
            Command::Init { visible } | Command::SetVisible { visible } => {
                self.visible = Some(visible);
                Ok(None)
            }
            Command::OpenWorkbook { path } | Command::CreateWorkbook { path } => {
                self.workbooks.push(WorkbookState::new(path));
                let book = self.workbooks.len() - 1;
                Ok(self.add(Object::Workbook(book)))
            }
            Command::ActiveWorksheet { workbook } => {
                let b = self.workbook_of(workbook)?;
                let active = self.workbooks[b].active;
                Ok(self.add(Object::Sheet(b, active)))
            }
            Command::WorksheetCount { workbook } => {
                let b = self.workbook_of(workbook)?;
                let count = self.workbooks[b].sheets.len() as u32;
                Ok(Some(ResponseData::Count { count }))
            }
            Command::Worksheet { workbook, index } => {
                let b = self.workbook_of(workbook)?;
                let count = self.workbooks[b].sheets.len();
                if index == 0 || index as usize > count {
                    return Err(AutomationError::Host("Subscript out of range".into()));
                }
                Ok(self.add(Object::Sheet(b, index as usize - 1)))
            }
            Command::SaveWorkbook { workbook } => {
                let b = self.workbook_of(workbook)?;
                self.workbooks[b].saves += 1;
                Ok(None)
            }
            Command::SaveWorkbookAs {
                workbook,
                path,
                format,
            } => {
                let b = self.workbook_of(workbook)?;
                self.workbooks[b].saved_as = Some((path, format));
                Ok(None)
            }
            Command::CloseWorkbook { workbook } => {
                let b = self.workbook_of(workbook)?;
                self.workbooks[b].open = false;
                self.objects.remove(&workbook);
                Ok(None)
            }
            Command::GetSheetName { sheet } => {
                let (b, s) = self.sheet_of(sheet)?;
                let text = self.workbooks[b].sheets[s].name.clone();
                Ok(Some(ResponseData::Text { text }))
            }
            Command::SetSheetName { sheet, name } => {
                let (b, s) = self.sheet_of(sheet)?;
                self.sheet_mut(b, s).name = name;
                Ok(None)
            }
            Command::CopySheet { sheet, after } => {
                let (b, s) = self.sheet_of(sheet)?;
                let book = &mut self.workbooks[b];
                let mut copy = book.sheets[s].clone();
                copy.name = format!("{} (2)", copy.name);
                let at = if after { s + 1 } else { s };
                book.sheets.insert(at, copy);
                book.active = at;
                Ok(None)
            }
            Command::MergeRange {
                sheet,
                range,
                across,
            } => {
                let (b, s) = self.sheet_of(sheet)?;
                self.sheet_mut(b, s).merges.push((range, across));
                Ok(None)
            }
            Command::GetRange { sheet, range } => {
                let (b, s) = self.sheet_of(sheet)?;
                let range = RangeRef::parse(&range)?;
                Ok(self.add(Object::Range(b, s, range)))
            }
            Command::ReadRange { range } => {
                let (b, s, r) = self.range_of(range)?;
                if let Some(text) = self.read_override.take() {
                    return Ok(Some(ResponseData::Text { text }));
                }
                let sheet = &self.workbooks[b].sheets[s];
                let rows = cells(r).map(|row| {
                    row.into_iter()
                        .map(|cell| {
                            sheet
                                .cells
                                .get(&cell)
                                .map(CellValue::to_text)
                                .unwrap_or_default()
                        })
                        .collect::<Vec<_>>()
                });
                let grid = Grid::from_rows(rows).map_err(|e| AutomationError::Host(e.to_string()))?;
                Ok(Some(ResponseData::Text {
                    text: encode(&grid),
                }))
            }
            Command::WriteRange { range, data } => {
                let (b, s, r) = self.range_of(range)?;
                let grid = decode(&data)?;
                let sheet = self.sheet_mut(b, s);
                for (values, targets) in grid.iter_rows().zip(cells(r)) {
                    for (value, target) in values.iter().zip(targets) {
                        sheet.cells.insert(target, CellValue::String(value.clone()));
                    }
                }
                Ok(None)
            }
            Command::GetValue { range } => {
                let (b, s, r) = self.range_of(range)?;
                let value = self.workbooks[b].sheets[s]
                    .cells
                    .get(&r.start)
                    .cloned()
                    .unwrap_or(CellValue::Null);
                Ok(Some(ResponseData::Value { value }))
            }
            Command::SetValue { range, value } => {
                let (b, s, r) = self.range_of(range)?;
                let sheet = self.sheet_mut(b, s);
                for cell in cells(r).flatten() {
                    sheet.cells.insert(cell, value.clone());
                }
                Ok(None)
            }
            Command::GetFont { range } => {
                let (b, s, r) = self.range_of(range)?;
                Ok(self.add(Object::Font(b, s, r)))
            }
            Command::GetFontProperty { font, property } => {
                let Object::Font(b, s, r) = self.lookup(font)? else {
                    return Err(AutomationError::Host(format!("{font} is not a font")));
                };
                let state = self.workbooks[b].sheets[s]
                    .fonts
                    .get(&r.start)
                    .cloned()
                    .unwrap_or_default();
                let value = match property {
                    FontProperty::Name => CellValue::String(state.name),
                    FontProperty::Size => CellValue::Number(state.size),
                    FontProperty::Bold => CellValue::Bool(state.bold),
                    FontProperty::Italic => CellValue::Bool(state.italic),
                    FontProperty::Color => CellValue::Number(state.color),
                };
                Ok(Some(ResponseData::Value { value }))
            }
            Command::SetFontProperty {
                font,
                property,
                value,
            } => {
                let Object::Font(b, s, r) = self.lookup(font)? else {
                    return Err(AutomationError::Host(format!("{font} is not a font")));
                };
                let sheet = self.sheet_mut(b, s);
                for cell in cells(r).flatten() {
                    let state = sheet.fonts.entry(cell).or_default();
                    match (property, &value) {
                        (FontProperty::Name, CellValue::String(v)) => state.name = v.clone(),
                        (FontProperty::Size, CellValue::Number(v)) => state.size = *v,
                        (FontProperty::Bold, CellValue::Bool(v)) => state.bold = *v,
                        (FontProperty::Italic, CellValue::Bool(v)) => state.italic = *v,
                        (FontProperty::Color, CellValue::Number(v)) => state.color = *v,
                        _ => return Err(AutomationError::Host("Type mismatch".into())),
                    }
                }
                Ok(None)
            }
            Command::SetAlignment {
                range,
                horizontal,
                vertical,
            } => {
                let (b, s, r) = self.range_of(range)?;
                let sheet = self.sheet_mut(b, s);
                for cell in cells(r).flatten() {
                    if let Some(h) = horizontal {
                        sheet.horizontal.insert(cell, h);
                    }
                    if let Some(v) = vertical {
                        sheet.vertical.insert(cell, v);
                    }
                }
                Ok(None)
            }
            Command::Release { object } => {
                self.lookup(object)?;
                self.objects.remove(&object);
                self.released.push(object);
                Ok(None)
            }
            Command::Shutdown => {
                self.shut_down = true;
                self.objects.clear();
                Ok(None)
            }
        }
    }
}

/// Cells of a range, row by row.
fn cells(range: RangeRef) -> impl Iterator<Item = Vec<CellRef>> {
    (range.start.row..=range.end.row).map(move |row| {
        (range.start.col..=range.end.col)
            .map(|col| CellRef::new(row, col))
            .collect()
    })
}

/// Cloneable handle to a shared fake host. Give one clone to
/// [`xlauto::Application::with_host`] and keep the other to inspect state.
#[derive(Clone, Default)]
pub struct FakeHost {
    state: Arc<Mutex<State>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("fake host state poisoned")
    }
}

impl AutomationHost for FakeHost {
    fn call(&self, command: Command) -> Result<Option<ResponseData>> {
        let mut state = self.state();
        state.commands.push(command.clone());
        if let Some(name) = state.fail_on {
            if format!("{command:?}").starts_with(name) {
                state.fail_on = None;
                return Err(AutomationError::Host(format!("{name} failed")));
            }
        }
        state.execute(command)
    }

    fn host_path(&self, path: &Path) -> String {
        format!("C:\\fake\\{}", path.display())
    }
}
