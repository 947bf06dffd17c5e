//! TUI application state and event loop

use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiWidgetEvent, TuiWidgetState};

use shared::models::PaymentMethod;

use crate::checkout::CheckoutState;
use crate::session::{PosSession, SessionEvent};
use crate::square;

/// Environment variable with the Square application client id
pub const SQUARE_CLIENT_ID_ENV: &str = "YATAI_SQUARE_CLIENT_ID";

/// Environment variable with the Square payment callback URL
pub const SQUARE_CALLBACK_URL_ENV: &str = "YATAI_SQUARE_CALLBACK_URL";

/// Which part of the UI currently receives keystrokes
///
/// The payment dialog is not a mode: it takes over input whenever the
/// checkout flow is open.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    EditingTicket,
    SelectingSlot,
    EditingSettings,
}

/// TUI application state
pub struct App {
    pub session: PosSession,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    pub mode: Mode,
    pub product_cursor: usize,
    pub slot_cursor: usize,
    pub ticket_input: Input,
    pub settings_input: Input,
    pub transaction_input: Input,
    pub logger_state: TuiWidgetState,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: PosSession, events_rx: mpsc::UnboundedReceiver<SessionEvent>) -> Self {
        Self {
            session,
            events_rx,
            mode: Mode::default(),
            product_cursor: 0,
            slot_cursor: 0,
            ticket_input: Input::default(),
            settings_input: Input::default(),
            transaction_input: Input::default(),
            logger_state: TuiWidgetState::new(),
            should_quit: false,
        }
    }

    fn product_count(&self) -> usize {
        self.session
            .catalog
            .as_ref()
            .map(|catalog| catalog.products.len())
            .unwrap_or(0)
    }

    fn selected_product_id(&self) -> Option<String> {
        self.session
            .catalog
            .as_ref()
            .and_then(|catalog| catalog.products.get(self.product_cursor))
            .map(|product| product.id.clone())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.session.checkout.is_open() {
            self.handle_payment_key(key);
            return;
        }

        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::EditingTicket => self.handle_ticket_key(key),
            Mode::SelectingSlot => self.handle_slot_key(key),
            Mode::EditingSettings => self.handle_settings_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.product_cursor = self.product_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let count = self.product_count();
                if count > 0 && self.product_cursor < count - 1 {
                    self.product_cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char('a') => {
                if let Some(product_id) = self.selected_product_id() {
                    self.session.add_to_cart(&product_id);
                }
            }
            KeyCode::Char('-') | KeyCode::Char('x') => {
                if let Some(product_id) = self.selected_product_id() {
                    self.session.remove_from_cart(&product_id);
                }
            }
            KeyCode::Char('t') => {
                self.ticket_input = Input::new(self.session.ticket_number.clone());
                self.mode = Mode::EditingTicket;
            }
            KeyCode::Char('s') => {
                self.slot_cursor = self
                    .session
                    .selected_slot
                    .as_deref()
                    .and_then(|id| self.session.slots.iter().position(|slot| slot.id == id))
                    .unwrap_or(0);
                self.mode = Mode::SelectingSlot;
            }
            KeyCode::Char('o') => {
                self.settings_input = Input::new(self.session.settings().api_base_url.clone());
                self.mode = Mode::EditingSettings;
            }
            KeyCode::Char('c') => self.session.begin_checkout(),
            KeyCode::Char('C') => self.session.clear_cart(),
            KeyCode::Char('r') => self.session.refresh_inventory(),
            KeyCode::PageUp => self.logger_state.transition(TuiWidgetEvent::PrevPageKey),
            KeyCode::PageDown => self.logger_state.transition(TuiWidgetEvent::NextPageKey),
            _ => {}
        }
    }

    fn handle_ticket_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.session.ticket_number = self.ticket_input.value().trim().to_string();
                self.mode = Mode::Normal;
            }
            KeyCode::Esc => self.mode = Mode::Normal,
            _ => {
                self.ticket_input.handle_event(&Event::Key(key));
            }
        }
    }

    fn handle_slot_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.slot_cursor = self.slot_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.session.slots.is_empty()
                    && self.slot_cursor < self.session.slots.len() - 1
                {
                    self.slot_cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(slot) = self.session.slots.get(self.slot_cursor) {
                    let slot_id = slot.id.clone();
                    self.session.select_slot(&slot_id);
                    self.product_cursor = 0;
                }
                self.mode = Mode::Normal;
            }
            KeyCode::Esc => self.mode = Mode::Normal,
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let url = self.settings_input.value().trim().to_string();
                self.session.apply_settings(url);
                self.mode = Mode::Normal;
            }
            KeyCode::Esc => self.mode = Mode::Normal,
            _ => {
                self.settings_input.handle_event(&Event::Key(key));
            }
        }
    }

    fn handle_payment_key(&mut self, key: KeyEvent) {
        match self.session.checkout.state().clone() {
            CheckoutState::SelectingPayment => match key.code {
                KeyCode::Char('1') => self.session.select_payment(PaymentMethod::Cash),
                KeyCode::Char('2') => self.session.select_payment(PaymentMethod::PayPay),
                KeyCode::Char('3') => {
                    self.session.select_payment(PaymentMethod::Square);
                    self.transaction_input = Input::default();
                    self.log_square_deep_link();
                }
                KeyCode::Esc => self.session.cancel_checkout(),
                _ => {}
            },
            CheckoutState::ConfirmingPayment {
                method: PaymentMethod::Square,
                ..
            } => match key.code {
                KeyCode::Enter => {
                    let transaction_id = self.transaction_input.value().trim().to_string();
                    if !transaction_id.is_empty() {
                        self.session.set_transaction_id(&transaction_id);
                        self.session.confirm_payment();
                    }
                }
                KeyCode::Esc => self.session.payment_back(),
                _ => {
                    self.transaction_input.handle_event(&Event::Key(key));
                }
            },
            CheckoutState::ConfirmingPayment { .. } => match key.code {
                KeyCode::Enter => self.session.confirm_payment(),
                KeyCode::Esc => self.session.payment_back(),
                _ => {}
            },
            // ignore input while the order is in flight
            CheckoutState::Submitting { .. } | CheckoutState::Idle => {}
        }
    }

    /// Log the Square POS deep link so the cashier can open it on the
    /// paired device; the transaction id comes back by manual entry.
    fn log_square_deep_link(&self) {
        let client_id = std::env::var(SQUARE_CLIENT_ID_ENV).unwrap_or_default();
        let callback_url = std::env::var(SQUARE_CALLBACK_URL_ENV)
            .unwrap_or_else(|_| "http://localhost:3000/square-callback".to_string());
        let link = square::charge_deep_link(
            self.session.cart.total_amount(),
            &self.session.ticket_number,
            &client_id,
            &callback_url,
        );
        tracing::info!(%link, "open the Square POS app to take the payment");
    }
}

/// Run the TUI event loop until the user quits
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> std::io::Result<()> {
    loop {
        // apply backend results before drawing
        while let Ok(event) = app.events_rx.try_recv() {
            app.session.apply_event(event);
        }

        // keep the cursor inside the product list after a refresh
        let count = app.product_count();
        if count > 0 && app.product_cursor >= count {
            app.product_cursor = count - 1;
        }

        terminal.draw(|frame| super::render::draw(frame, app))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    app.handle_key(key);
                }
            }
        }
    }
}
