// Drag session carrier: the typed entries a drag gesture carries, plus the
// effect negotiation between source and target.

/// Operations the drag source permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectAllowed {
    #[default]
    Uninitialized,
    None,
    Copy,
    Move,
    CopyMove,
    All,
}

/// Operation the current target would perform on drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
}

/// Which parts of the session are accessible in the current phase.
///
/// Platforms only let the drag source write, and only let the drop handler
/// read values. While hovering, a target sees the type tags and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// `dragstart`: entries can be written.
    ReadWrite,
    /// `dragenter` / `dragover` / `dragleave`: types only.
    Protected,
    /// `drop`: values can be read.
    ReadOnly,
}

#[derive(Debug, Clone)]
pub struct DataTransfer {
    entries: Vec<(String, String)>,
    mode: SessionMode,
    drag_image_label: Option<String>,
    pub effect_allowed: EffectAllowed,
    pub drop_effect: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            mode: SessionMode::ReadWrite,
            drag_image_label: None,
            effect_allowed: EffectAllowed::Uninitialized,
            drop_effect: DropEffect::None,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Switch access phase. Hosts call this as the gesture moves from the
    /// source to a target and finally to the drop.
    pub fn set_mode(&mut self, mode: SessionMode) {
        self.mode = mode;
    }

    /// Store `data` under `format`, keeping the original slot if the format
    /// was already set. Returns false outside the write phase.
    pub fn set_data(&mut self, format: &str, data: &str) -> bool {
        if self.mode != SessionMode::ReadWrite {
            return false;
        }
        match self.entries.iter_mut().find(|(f, _)| f == format) {
            Some(entry) => entry.1 = data.to_string(),
            None => self.entries.push((format.to_string(), data.to_string())),
        }
        true
    }

    /// Value stored under `format`. Always `None` while protected.
    pub fn get_data(&self, format: &str) -> Option<&str> {
        if self.mode == SessionMode::Protected {
            return None;
        }
        self.entries
            .iter()
            .find(|(f, _)| f == format)
            .map(|(_, data)| data.as_str())
    }

    /// Type tags in the order they were written. Readable in every phase.
    pub fn types(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    /// Label shown on the ghost image under the pointer.
    pub fn set_drag_image_label(&mut self, label: &str) {
        self.drag_image_label = Some(label.to_string());
    }

    pub fn drag_image_label(&self) -> Option<&str> {
        self.drag_image_label.as_deref()
    }
}

impl Default for DataTransfer {
    fn default() -> Self {
        Self::new()
    }
}
