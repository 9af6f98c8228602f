use std::fmt;

use crate::value::FieldValue;

/// One named structured field of a log event.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    name: &'static str,
    value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    pub const fn new(name: &'static str, value: FieldValue<'a>) -> Self {
        Self { name, value }
    }

    /// The parameter name the field was declared with.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn value(&self) -> FieldValue<'a> {
        self.value
    }
}

/// Indexed access to the structured fields of a log event.
///
/// Fields appear in the order the log method declares its parameters.
/// Accessing fields never renders the message.
pub trait LogFields {
    /// Number of fields.
    fn len(&self) -> usize;

    /// The field at `index`, or `None` past the end.
    fn field(&self, index: usize) -> Option<Field<'_>>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates fields in declaration order.
    fn iter(&self) -> FieldsIter<'_, Self>
    where
        Self: Sized,
    {
        FieldsIter {
            fields: self,
            index: 0,
        }
    }

    /// Looks a field up by name.
    fn get(&self, name: &str) -> Option<FieldValue<'_>> {
        (0..self.len())
            .filter_map(|index| self.field(index))
            .find(|field| field.name() == name)
            .map(|field| field.value())
    }
}

impl LogFields for () {
    fn len(&self) -> usize {
        0
    }

    fn field(&self, _index: usize) -> Option<Field<'_>> {
        None
    }
}

impl<'f> dyn LogFields + 'f {
    /// Iterates the fields of a type-erased field set.
    pub fn fields(&self) -> FieldsIter<'_, dyn LogFields + 'f> {
        FieldsIter {
            fields: self,
            index: 0,
        }
    }
}

/// Iterator over the fields of a [`LogFields`] value.
pub struct FieldsIter<'a, F: ?Sized> {
    fields: &'a F,
    index: usize,
}

impl<'a, F: LogFields + ?Sized> Iterator for FieldsIter<'a, F> {
    type Item = Field<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let fields = self.fields;
        let field = fields.field(self.index)?;
        self.index += 1;
        Some(field)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.fields.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<F: LogFields + ?Sized> ExactSizeIterator for FieldsIter<'_, F> {}

/// Formats fields as `name=value` pairs separated by spaces.
pub struct FieldsDisplay<'a>(pub &'a dyn LogFields);

impl fmt::Display for FieldsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, field) in self.0.fields().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={:?}", field.name(), field.value())?;
        }
        Ok(())
    }
}
