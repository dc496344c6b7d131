use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use engine::{
    ExpenseItem, ItemRow, PayerMode, Registry, Session, SplitSpec, Totals, item_rows, split_valid,
};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    export, input,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Participants,
    Items,
    Summary,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Participants => "People",
            Self::Items => "Items",
            Self::Summary => "Summary",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Participants => Self::Items,
            Self::Items => Self::Summary,
            Self::Summary => Self::Participants,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantsMode {
    List,
    Rename,
}

#[derive(Debug)]
pub struct ParticipantsState {
    pub selected: usize,
    pub mode: ParticipantsMode,
    pub input: String,
}

impl Default for ParticipantsState {
    fn default() -> Self {
        Self {
            selected: 0,
            mode: ParticipantsMode::List,
            input: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemsMode {
    List,
    Edit,
}

#[derive(Debug)]
pub struct ItemsState {
    pub selected: usize,
    pub mode: ItemsMode,
    pub editor: Option<ItemEditor>,
}

impl Default for ItemsState {
    fn default() -> Self {
        Self {
            selected: 0,
            mode: ItemsMode::List,
            editor: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMode {
    View,
    EditTax,
    EditTip,
}

#[derive(Debug)]
pub struct SummaryState {
    pub mode: SummaryMode,
    pub input: String,
}

impl Default for SummaryState {
    fn default() -> Self {
        Self {
            mode: SummaryMode::View,
            input: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Name,
    Cost,
    Payer,
    Unit,
    Share(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitUnit {
    Percent,
    Dollar,
}

/// Modal field editor for one ledger item.
///
/// The payer choice is an index into `participants ++ [Split Evenly,
/// Custom Split]`, mirroring the selector the registry renders. Share
/// buffers are raw text; they are coerced leniently on commit and checked
/// live for the validity highlight.
#[derive(Debug)]
pub struct ItemEditor {
    pub item_id: Option<Uuid>,
    pub field: EditorField,
    pub name: String,
    pub cost: String,
    pub payer: usize,
    pub unit: SplitUnit,
    pub shares: Vec<String>,
}

impl ItemEditor {
    pub fn new(participant_count: usize) -> Self {
        Self {
            item_id: None,
            field: EditorField::Name,
            name: String::new(),
            cost: String::new(),
            payer: 0,
            unit: SplitUnit::Percent,
            shares: vec![String::new(); participant_count],
        }
    }

    pub fn for_item(item: &ExpenseItem, participants: &Registry) -> Self {
        let count = participants.len();
        let mut editor = Self::new(count);
        editor.item_id = Some(item.id);
        editor.name = item.name.clone();
        editor.cost = if item.cost.is_zero() {
            String::new()
        } else {
            item.cost.to_string()
        };

        match &item.payer {
            PayerMode::Single(id) => {
                // A payer deleted since the item was created degrades to the
                // even split slot.
                editor.payer = participants.index_of(*id).unwrap_or(count);
            }
            PayerMode::Even => editor.payer = count,
            PayerMode::Custom(spec) => {
                editor.payer = count + 1;
                match spec {
                    SplitSpec::Percent(values) => {
                        editor.unit = SplitUnit::Percent;
                        editor.shares = participants
                            .ids()
                            .map(|id| values.get(&id).map(ToString::to_string).unwrap_or_default())
                            .collect();
                    }
                    SplitSpec::Dollar(values) => {
                        editor.unit = SplitUnit::Dollar;
                        editor.shares = participants
                            .ids()
                            .map(|id| values.get(&id).map(ToString::to_string).unwrap_or_default())
                            .collect();
                    }
                }
            }
        }

        editor
    }

    pub fn is_custom(&self, participant_count: usize) -> bool {
        self.payer == participant_count + 1
    }

    pub fn payer_label(&self, participants: &Registry) -> String {
        let count = participants.len();
        if self.payer < count {
            participants
                .get(self.payer)
                .map(|p| p.name.clone())
                .unwrap_or_default()
        } else if self.payer == count {
            "Split Evenly".to_string()
        } else {
            "Custom Split".to_string()
        }
    }

    pub fn cycle_payer(&mut self, participant_count: usize, up: bool) {
        let choices = participant_count + 2;
        self.payer = if up {
            (self.payer + choices - 1) % choices
        } else {
            (self.payer + 1) % choices
        };
    }

    pub fn toggle_unit(&mut self) {
        self.unit = match self.unit {
            SplitUnit::Percent => SplitUnit::Dollar,
            SplitUnit::Dollar => SplitUnit::Percent,
        };
    }

    pub fn next_field(&mut self, participant_count: usize) {
        self.field = match self.field {
            EditorField::Name => EditorField::Cost,
            EditorField::Cost => EditorField::Payer,
            EditorField::Payer => {
                if self.is_custom(participant_count) {
                    EditorField::Unit
                } else {
                    EditorField::Name
                }
            }
            EditorField::Unit => EditorField::Share(0),
            EditorField::Share(i) if i + 1 < self.shares.len() => EditorField::Share(i + 1),
            EditorField::Share(_) => EditorField::Name,
        };
    }

    pub fn buffer_mut(&mut self) -> Option<&mut String> {
        match self.field {
            EditorField::Name => Some(&mut self.name),
            EditorField::Cost => Some(&mut self.cost),
            EditorField::Share(i) => self.shares.get_mut(i),
            EditorField::Payer | EditorField::Unit => None,
        }
    }

    pub fn split_spec(&self, participants: &Registry) -> SplitSpec {
        match self.unit {
            SplitUnit::Percent => SplitSpec::Percent(
                participants
                    .ids()
                    .zip(self.shares.iter().map(|s| input::percent_or_zero(s)))
                    .collect(),
            ),
            SplitUnit::Dollar => SplitSpec::Dollar(
                participants
                    .ids()
                    .zip(self.shares.iter().map(|s| input::money_or_zero(s)))
                    .collect(),
            ),
        }
    }

    /// Live validity of the custom-split buffers, for the editor highlight.
    pub fn custom_is_valid(&self, participants: &Registry) -> bool {
        let cost = input::money_or_zero(&self.cost);
        split_valid(&self.split_spec(participants), cost, participants)
    }

    pub fn build_payer(&self, participants: &Registry) -> PayerMode {
        let count = participants.len();
        if self.payer < count {
            match participants.get(self.payer) {
                Some(p) => PayerMode::Single(p.id),
                None => PayerMode::Even,
            }
        } else if self.payer == count {
            PayerMode::Even
        } else {
            PayerMode::Custom(self.split_spec(participants))
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub section: Section,
    pub participants: ParticipantsState,
    pub items: ItemsState,
    pub summary: SummaryState,
    pub totals: Totals,
    pub rows: Vec<ItemRow>,
    pub notice: Option<String>,
}

pub struct App {
    config: AppConfig,
    pub session: Session,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let session = Session::new(&config.participants);
        let totals = session.recompute();
        let rows = item_rows(&session);

        Self {
            config,
            session,
            state: AppState {
                section: Section::Items,
                participants: ParticipantsState::default(),
                items: ItemsState::default(),
                summary: SummaryState::default(),
                totals,
                rows,
                notice: None,
            },
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, self))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key)?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        self.state.notice = None;
        match self.state.section {
            Section::Participants => self.handle_participants(action),
            Section::Items => self.handle_items(action),
            Section::Summary => self.handle_summary(action),
        }

        Ok(())
    }

    /// Recomputes totals and breakdown rows from the current session.
    /// Called after every mutation; the ledger is always small enough that
    /// recomputing everything beats tracking what changed.
    fn refresh(&mut self) {
        self.state.totals = self.session.recompute();
        self.state.rows = item_rows(&self.session);

        let people = self.session.participants().len();
        self.state.participants.selected = self.state.participants.selected.min(people - 1);
        let items = self.session.items().len();
        self.state.items.selected = self.state.items.selected.min(items.saturating_sub(1));

        tracing::debug!(people, items, "recomputed totals");
    }

    fn handle_nav(&mut self, ch: char) {
        match ch {
            'q' => self.should_quit = true,
            'p' => self.state.section = Section::Participants,
            'i' => self.state.section = Section::Items,
            's' => self.state.section = Section::Summary,
            _ => {}
        }
    }

    fn handle_participants(&mut self, action: AppAction) {
        match self.state.participants.mode {
            ParticipantsMode::List => match action {
                AppAction::Up => {
                    self.state.participants.selected =
                        self.state.participants.selected.saturating_sub(1);
                }
                AppAction::Down => {
                    let max = self.session.participants().len() - 1;
                    let selected = &mut self.state.participants.selected;
                    *selected = (*selected + 1).min(max);
                }
                AppAction::Input('a') => {
                    let id = self.session.add_participant();
                    tracing::debug!(%id, "added participant");
                    self.refresh();
                }
                AppAction::Input('d') => {
                    let id = self
                        .session
                        .participants()
                        .get(self.state.participants.selected)
                        .map(|p| p.id);
                    if let Some(id) = id {
                        if self.session.remove_participant(id) {
                            tracing::debug!(%id, "removed participant");
                            self.refresh();
                        } else {
                            self.state.notice =
                                Some("At least two people are required.".to_string());
                        }
                    }
                }
                AppAction::Input('e') | AppAction::Submit => {
                    let name = self
                        .session
                        .participants()
                        .get(self.state.participants.selected)
                        .map(|p| p.name.clone());
                    if let Some(name) = name {
                        self.state.participants.input = name;
                        self.state.participants.mode = ParticipantsMode::Rename;
                    }
                }
                AppAction::Input(ch) => self.handle_nav(ch),
                AppAction::NextField => self.state.section = self.state.section.next(),
                _ => {}
            },
            ParticipantsMode::Rename => match action {
                AppAction::Input(ch) => self.state.participants.input.push(ch),
                AppAction::Backspace => {
                    self.state.participants.input.pop();
                }
                AppAction::Submit => {
                    let id = self
                        .session
                        .participants()
                        .get(self.state.participants.selected)
                        .map(|p| p.id);
                    if let Some(id) = id {
                        let name = self.state.participants.input.clone();
                        self.session.rename_participant(id, &name);
                    }
                    self.state.participants.mode = ParticipantsMode::List;
                    self.refresh();
                }
                AppAction::Cancel => self.state.participants.mode = ParticipantsMode::List,
                _ => {}
            },
        }
    }

    fn handle_items(&mut self, action: AppAction) {
        match self.state.items.mode {
            ItemsMode::List => match action {
                AppAction::Up => {
                    self.state.items.selected = self.state.items.selected.saturating_sub(1);
                }
                AppAction::Down => {
                    let len = self.session.items().len();
                    if len > 0 {
                        let selected = &mut self.state.items.selected;
                        *selected = (*selected + 1).min(len - 1);
                    }
                }
                AppAction::Input('a') => {
                    let count = self.session.participants().len();
                    self.state.items.editor = Some(ItemEditor::new(count));
                    self.state.items.mode = ItemsMode::Edit;
                }
                AppAction::Input('e') | AppAction::Submit => {
                    let editor = self
                        .session
                        .items()
                        .get(self.state.items.selected)
                        .map(|item| ItemEditor::for_item(item, self.session.participants()));
                    if let Some(editor) = editor {
                        self.state.items.editor = Some(editor);
                        self.state.items.mode = ItemsMode::Edit;
                    }
                }
                AppAction::Input('d') => {
                    let id = self
                        .session
                        .items()
                        .get(self.state.items.selected)
                        .map(|item| item.id);
                    if let Some(id) = id {
                        self.session.remove_item(id);
                        tracing::debug!(%id, "removed item");
                        self.refresh();
                    }
                }
                AppAction::Input(ch) => self.handle_nav(ch),
                AppAction::NextField => self.state.section = self.state.section.next(),
                _ => {}
            },
            ItemsMode::Edit => self.handle_item_editor(action),
        }
    }

    fn handle_item_editor(&mut self, action: AppAction) {
        let count = self.session.participants().len();
        match action {
            AppAction::NextField => {
                if let Some(editor) = self.state.items.editor.as_mut() {
                    editor.next_field(count);
                }
            }
            AppAction::Up | AppAction::Down => {
                if let Some(editor) = self.state.items.editor.as_mut() {
                    match editor.field {
                        EditorField::Payer => editor.cycle_payer(count, action == AppAction::Up),
                        EditorField::Unit => editor.toggle_unit(),
                        _ => {}
                    }
                }
            }
            AppAction::Input(ch) => {
                if let Some(buffer) = self
                    .state
                    .items
                    .editor
                    .as_mut()
                    .and_then(ItemEditor::buffer_mut)
                {
                    buffer.push(ch);
                }
            }
            AppAction::Backspace => {
                if let Some(buffer) = self
                    .state
                    .items
                    .editor
                    .as_mut()
                    .and_then(ItemEditor::buffer_mut)
                {
                    buffer.pop();
                }
            }
            AppAction::Submit => {
                if let Some(editor) = self.state.items.editor.take() {
                    let name = editor.name.trim().to_string();
                    let cost = input::money_or_zero(&editor.cost);
                    let payer = editor.build_payer(self.session.participants());
                    match editor.item_id {
                        Some(id) => {
                            self.session.update_item(id, name, cost, payer);
                            tracing::debug!(%id, "updated item");
                        }
                        None => {
                            let id = self.session.add_item(name, cost, payer);
                            tracing::debug!(%id, "added item");
                        }
                    }
                }
                self.state.items.mode = ItemsMode::List;
                self.refresh();
            }
            AppAction::Cancel => {
                self.state.items.editor = None;
                self.state.items.mode = ItemsMode::List;
            }
            _ => {}
        }
    }

    fn handle_summary(&mut self, action: AppAction) {
        match self.state.summary.mode {
            SummaryMode::View => match action {
                AppAction::Input('t') => {
                    self.state.summary.input = if self.session.tax().is_zero() {
                        String::new()
                    } else {
                        self.session.tax().to_string()
                    };
                    self.state.summary.mode = SummaryMode::EditTax;
                }
                AppAction::Input('i') => {
                    self.state.summary.input = if self.session.tip().is_zero() {
                        String::new()
                    } else {
                        self.session.tip().to_string()
                    };
                    self.state.summary.mode = SummaryMode::EditTip;
                }
                AppAction::Input('x') => self.export(),
                AppAction::Input(ch) => self.handle_nav(ch),
                AppAction::NextField => self.state.section = self.state.section.next(),
                _ => {}
            },
            SummaryMode::EditTax | SummaryMode::EditTip => match action {
                AppAction::Input(ch) => self.state.summary.input.push(ch),
                AppAction::Backspace => {
                    self.state.summary.input.pop();
                }
                AppAction::Submit => {
                    let amount = input::money_or_zero(&self.state.summary.input);
                    if self.state.summary.mode == SummaryMode::EditTax {
                        self.session.set_tax(amount);
                    } else {
                        self.session.set_tip(amount);
                    }
                    self.state.summary.mode = SummaryMode::View;
                    self.refresh();
                }
                AppAction::Cancel => self.state.summary.mode = SummaryMode::View,
                _ => {}
            },
        }
    }

    fn export(&mut self) {
        let path = std::path::PathBuf::from(&self.config.export_path);
        match export::write_csv(&path, &self.session) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "exported session");
                self.state.notice = Some(format!("Exported to {}", path.display()));
            }
            Err(err) => {
                tracing::error!("export failed: {err}");
                self.state.notice = Some(format!("Export failed: {err}"));
            }
        }
    }
}
