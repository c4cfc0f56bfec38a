use heapless::String;

use crate::error::Error;

/// Text copied out of a sentence field, at most `N` bytes long.
pub type Text<const N: usize> = String<N>;

/// Cursor over the comma separated fields of a sentence body.
pub(crate) struct Fields<'a> {
    inner: core::str::Split<'a, char>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(body: &'a str) -> Self {
        Self {
            inner: body.split(','),
        }
    }

    /// Next field. The field must exist but may be empty.
    pub(crate) fn text<const N: usize>(
        &mut self,
        name: &'static str,
    ) -> Result<Option<Text<N>>, Error<'a>> {
        let raw = self.inner.next().ok_or(Error::MissingField(name))?;
        bounded(name, raw)
    }

    /// Next field, if the sentence has one. Used for trailing fields that
    /// older protocol revisions do not send.
    pub(crate) fn optional<const N: usize>(
        &mut self,
        name: &'static str,
    ) -> Result<Option<Text<N>>, Error<'a>> {
        match self.inner.next() {
            Some(raw) => bounded(name, raw),
            None => Ok(None),
        }
    }

    pub(crate) fn skip(&mut self, name: &'static str) -> Result<(), Error<'a>> {
        self.inner
            .next()
            .map(|_| ())
            .ok_or(Error::MissingField(name))
    }

    pub(crate) fn remaining(&self) -> usize {
        self.inner.clone().count()
    }
}

fn bounded<'a, const N: usize>(
    name: &'static str,
    raw: &str,
) -> Result<Option<Text<N>>, Error<'a>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let mut text = Text::new();
    text.push_str(raw).map_err(|_| Error::FieldOverflow {
        field: name,
        max: N,
        len: raw.len(),
    })?;
    Ok(Some(text))
}
