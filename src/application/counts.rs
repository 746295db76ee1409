//! Per-kind command tally shared by the use cases

use serde::Serialize;

use crate::domain::entities::CommandKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommandCounts {
    pub dir_add: usize,
    pub file_add: usize,
    pub file_update: usize,
    pub file_delete: usize,
    pub dir_delete: usize,
}

impl CommandCounts {
    pub fn record(&mut self, kind: CommandKind) {
        *self.slot(kind) += 1;
    }

    pub fn get(&self, kind: CommandKind) -> usize {
        match kind {
            CommandKind::DirAdd => self.dir_add,
            CommandKind::FileAdd => self.file_add,
            CommandKind::FileUpdate => self.file_update,
            CommandKind::FileDelete => self.file_delete,
            CommandKind::DirDelete => self.dir_delete,
        }
    }

    pub fn total(&self) -> usize {
        CommandKind::ALL.iter().map(|k| self.get(*k)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    fn slot(&mut self, kind: CommandKind) -> &mut usize {
        match kind {
            CommandKind::DirAdd => &mut self.dir_add,
            CommandKind::FileAdd => &mut self.file_add,
            CommandKind::FileUpdate => &mut self.file_update,
            CommandKind::FileDelete => &mut self.file_delete,
            CommandKind::DirDelete => &mut self.dir_delete,
        }
    }
}

impl<'a> FromIterator<&'a CommandKind> for CommandCounts {
    fn from_iter<I: IntoIterator<Item = &'a CommandKind>>(iter: I) -> Self {
        let mut counts = Self::default();
        for kind in iter {
            counts.record(*kind);
        }
        counts
    }
}
