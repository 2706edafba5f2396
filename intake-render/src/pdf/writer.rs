//! Minimal PDF 1.4 object writer with a classic cross-reference table.

/// Collects indirect objects and serializes them with an xref table.
pub(crate) struct ObjectWriter {
    objects: Vec<Option<Vec<u8>>>,
}

impl ObjectWriter {
    pub(crate) fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Reserves an object number to be filled in later with [`Self::set`].
    pub(crate) fn reserve(&mut self) -> usize {
        self.objects.push(None);
        self.objects.len()
    }

    pub(crate) fn set(&mut self, id: usize, body: impl Into<Vec<u8>>) {
        if let Some(slot) = self.objects.get_mut(id - 1) {
            *slot = Some(body.into());
        }
    }

    pub(crate) fn add(&mut self, body: impl Into<Vec<u8>>) -> usize {
        self.objects.push(Some(body.into()));
        self.objects.len()
    }

    /// Adds an uncompressed stream object.
    pub(crate) fn add_stream(&mut self, content: &str) -> usize {
        self.add_binary_stream("", content.as_bytes())
    }

    /// Adds a stream whose dictionary carries `entries` after `/Length`.
    /// `entries` is empty or starts with a space.
    pub(crate) fn add_binary_stream(&mut self, entries: &str, data: &[u8]) -> usize {
        let mut body = format!("<< /Length {}{entries} >>\nstream\n", data.len()).into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(b"\nendstream");
        self.add(body)
    }

    /// Serializes every object. Unfilled reservations become `null`.
    pub(crate) fn finish(self, root: usize, info: usize) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(self.objects.len());
        for (i, body) in self.objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
            match body {
                Some(bytes) => out.extend_from_slice(bytes),
                None => out.extend_from_slice(b"null"),
            }
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_at = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", self.objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root {root} 0 R /Info {info} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
                self.objects.len() + 1
            )
            .as_bytes(),
        );
        out
    }
}
