use std::io::{Read, Write};
use std::sync::Arc;

use crate::adapters::tabular::{parse_clipboard_block, read_rows, write_rows};
use crate::config::toml_config::{SessionConfig, TomlConfig};
use crate::core::assembler::generate_result;
use crate::core::policy::TransformPolicy;
use crate::domain::model::{Column, EntityMode, GenerationResult, ProfileType, Row};
use crate::utils::error::Result;
use crate::utils::validation::{validate_rows, ValidationReport};

/// Linear undo/redo log of immutable row snapshots. Holds at most `limit`
/// snapshots; the oldest is dropped first.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Arc<Vec<Row>>>,
    cursor: usize,
    limit: usize,
}

impl History {
    pub fn new(initial: Vec<Row>, limit: usize) -> Self {
        Self {
            snapshots: vec![Arc::new(initial)],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    pub fn current(&self) -> &Arc<Vec<Row>> {
        &self.snapshots[self.cursor]
    }

    /// Record a new state. Anything that could have been redone is discarded.
    pub fn push(&mut self, rows: Vec<Row>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(Arc::new(rows));
        if self.snapshots.len() > self.limit {
            let overflow = self.snapshots.len() - self.limit;
            self.snapshots.drain(..overflow);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 >= self.snapshots.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Rendered,
}

/// One operator's editing session: the rows, the mode selectors and the last
/// generated document. The transformation itself only ever sees a snapshot.
#[derive(Debug, Clone)]
pub struct Session {
    history: History,
    entity_mode: EntityMode,
    profile_type: ProfileType,
    policy: TransformPolicy,
    next_id: u64,
    rendered: Option<GenerationResult>,
}

impl Session {
    pub fn new(config: &SessionConfig, policy: TransformPolicy) -> Self {
        Self {
            history: History::new(Vec::new(), config.history_limit),
            entity_mode: EntityMode::default(),
            profile_type: ProfileType::default(),
            policy,
            next_id: 1,
            rendered: None,
        }
    }

    pub fn from_config(config: &TomlConfig) -> Self {
        Self::new(&config.session, config.policy.clone())
    }

    pub fn rows(&self) -> &[Row] {
        self.history.current()
    }

    pub fn entity_mode(&self) -> EntityMode {
        self.entity_mode
    }

    pub fn profile_type(&self) -> ProfileType {
        self.profile_type
    }

    pub fn state(&self) -> SessionState {
        if self.rendered.is_some() {
            SessionState::Rendered
        } else {
            SessionState::Idle
        }
    }

    pub fn rendered(&self) -> Option<&GenerationResult> {
        self.rendered.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Columns in grid order for the current profile type.
    pub fn columns(&self) -> Vec<Column> {
        Column::for_profile(self.profile_type)
    }

    // mode/profile 變更不影響已產生的輸出
    pub fn set_mode(&mut self, mode: EntityMode) {
        self.entity_mode = mode;
    }

    pub fn set_profile(&mut self, profile: ProfileType) {
        self.profile_type = profile;
    }

    pub fn set_policy(&mut self, policy: TransformPolicy) {
        self.policy = policy;
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn commit(&mut self, rows: Vec<Row>) {
        self.history.push(rows);
    }

    pub fn add_row(&mut self) -> u64 {
        let id = self.allocate_id();
        let mut rows = self.rows().to_vec();
        rows.push(Row::with_id(id));
        self.commit(rows);
        id
    }

    /// Returns `false` when no row has `row_id` or the value is unchanged.
    pub fn set_cell(&mut self, row_id: u64, column: Column, value: &str) -> bool {
        let Some(index) = self.rows().iter().position(|r| r.id == row_id) else {
            return false;
        };
        if self.rows()[index].get(column) == value {
            return false;
        }
        let mut rows = self.rows().to_vec();
        rows[index].set(column, value);
        self.commit(rows);
        true
    }

    pub fn delete_rows(&mut self, row_ids: &[u64]) -> usize {
        let rows: Vec<Row> = self
            .rows()
            .iter()
            .filter(|r| !row_ids.contains(&r.id))
            .cloned()
            .collect();
        let removed = self.rows().len() - rows.len();
        if removed > 0 {
            self.commit(rows);
        }
        removed
    }

    /// Paste a tab-separated block with its top-left cell at
    /// (`anchor_row`, `anchor_column`). Rows are added as needed; cells past
    /// the last grid column are ignored. Returns the number of cells written.
    pub fn paste_block(&mut self, anchor_row: usize, anchor_column: Column, text: &str) -> usize {
        let grid = parse_clipboard_block(text);
        let columns = self.columns();
        let Some(start_col) = columns.iter().position(|c| *c == anchor_column) else {
            return 0;
        };
        if grid.is_empty() {
            return 0;
        }

        let mut rows = self.rows().to_vec();
        let mut written = 0;
        for (offset, cells) in grid.iter().enumerate() {
            let target = anchor_row + offset;
            while rows.len() <= target {
                let id = self.allocate_id();
                rows.push(Row::with_id(id));
            }
            for (cell, column) in cells.iter().zip(columns.iter().skip(start_col)) {
                rows[target].set(*column, cell.trim());
                written += 1;
            }
        }

        self.commit(rows);
        written
    }

    /// Append every pasted line as a new row, cells mapped onto the grid
    /// columns from the first one.
    pub fn append_pasted_rows(&mut self, text: &str) -> usize {
        let grid = parse_clipboard_block(text);
        if grid.is_empty() {
            return 0;
        }
        let columns = self.columns();
        let mut rows = self.rows().to_vec();
        for cells in &grid {
            let mut row = Row::with_id(self.allocate_id());
            for (cell, column) in cells.iter().zip(columns.iter()) {
                row.set(*column, cell.trim());
            }
            rows.push(row);
        }
        self.commit(rows);
        grid.len()
    }

    /// Append rows read from CSV. Imported rows get fresh ids.
    pub fn import_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let imported = read_rows(reader)?;
        let count = imported.len();
        if count == 0 {
            return Ok(0);
        }
        let mut rows = self.rows().to_vec();
        for mut row in imported {
            row.id = self.allocate_id();
            rows.push(row);
        }
        self.commit(rows);
        tracing::info!("📥 Imported {} rows", count);
        Ok(count)
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> Result<()> {
        write_rows(writer, &self.columns(), self.rows())
    }

    pub fn clear(&mut self) {
        if !self.rows().is_empty() {
            self.commit(Vec::new());
        }
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn validate(&self) -> ValidationReport {
        validate_rows(self.rows(), self.entity_mode, self.profile_type)
    }

    /// Idle → Rendered. Re-generating replaces the previous output.
    pub fn generate(&mut self) -> Result<&GenerationResult> {
        let result = generate_result(
            self.rows(),
            self.entity_mode,
            self.profile_type,
            &self.policy,
        )?;
        tracing::info!(
            "🧾 Generated {} {} {} records",
            result.document.individuals.len(),
            self.profile_type,
            self.entity_mode
        );
        let rendered: &GenerationResult = self.rendered.insert(result);
        Ok(rendered)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&SessionConfig::default(), TransformPolicy::default())
    }
}
