//! Font handle.

use xlauto_protocol::{CellValue, Command, FontProperty};

use crate::constants::Rgb;
use crate::error::{AutomationError, Result};
use crate::object::{expect_value, HostObject};

/// The font of a range or cell.
pub struct Font<'a> {
    object: HostObject<'a>,
}

impl<'a> Font<'a> {
    pub(crate) fn new(object: HostObject<'a>) -> Self {
        Self { object }
    }

    pub fn name(&self) -> Result<String> {
        match self.get(FontProperty::Name)? {
            CellValue::String(name) => Ok(name),
            _ => Err(AutomationError::UnexpectedResponse("font name")),
        }
    }

    pub fn set_name(&self, name: &str) -> Result<()> {
        self.set(FontProperty::Name, name.into())
    }

    /// Size in points
    pub fn size(&self) -> Result<f64> {
        self.get(FontProperty::Size)?
            .as_f64()
            .ok_or(AutomationError::UnexpectedResponse("font size"))
    }

    pub fn set_size(&self, points: f64) -> Result<()> {
        self.set(FontProperty::Size, points.into())
    }

    pub fn bold(&self) -> Result<bool> {
        self.get(FontProperty::Bold)?
            .as_bool()
            .ok_or(AutomationError::UnexpectedResponse("font bold"))
    }

    pub fn set_bold(&self, bold: bool) -> Result<()> {
        self.set(FontProperty::Bold, bold.into())
    }

    pub fn italic(&self) -> Result<bool> {
        self.get(FontProperty::Italic)?
            .as_bool()
            .ok_or(AutomationError::UnexpectedResponse("font italic"))
    }

    pub fn set_italic(&self, italic: bool) -> Result<()> {
        self.set(FontProperty::Italic, italic.into())
    }

    pub fn color(&self) -> Result<Rgb> {
        let packed = self
            .get(FontProperty::Color)?
            .as_f64()
            .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(0x00FF_FFFF)).contains(n))
            .ok_or(AutomationError::UnexpectedResponse("font color"))?;
        Ok(Rgb::from_excel(packed as u32))
    }

    pub fn set_color(&self, color: Rgb) -> Result<()> {
        self.set(FontProperty::Color, f64::from(color.to_excel()).into())
    }

    fn get(&self, property: FontProperty) -> Result<CellValue> {
        let data = self.object.call(Command::GetFontProperty {
            font: self.object.id(),
            property,
        })?;
        expect_value(data, "GetFontProperty")
    }

    fn set(&self, property: FontProperty, value: CellValue) -> Result<()> {
        self.object.call(Command::SetFontProperty {
            font: self.object.id(),
            property,
            value,
        })?;
        Ok(())
    }
}
