//! TUI rendering

use ratatui::prelude::*;
use ratatui::widgets::*;
use tui_input::Input;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use shared::models::PaymentMethod;

use super::app::{App, Mode};
use crate::catalog::Stock;
use crate::checkout::CheckoutState;
use crate::session::NoticeLevel;

/// Products with fewer units than this get the low-stock color
const LOW_STOCK_THRESHOLD: i64 = 5;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(8), // Logs
            Constraint::Length(2), // Hints + notice
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);

    draw_products(frame, app, main_chunks[0]);
    draw_cart(frame, app, main_chunks[1]);
    draw_logs(frame, app, chunks[2]);
    draw_footer(frame, app, chunks[3]);

    match app.mode {
        Mode::SelectingSlot => draw_slot_dialog(frame, app),
        Mode::EditingTicket => {
            draw_input_dialog(frame, " Ticket Number ", &app.ticket_input)
        }
        Mode::EditingSettings => {
            draw_input_dialog(frame, " Settings: API Base URL ", &app.settings_input)
        }
        Mode::Normal => {}
    }

    if app.session.checkout.is_open() {
        draw_payment_dialog(frame, app);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let slot_span = match app.session.selected_slot.as_deref() {
        Some(slot_id) => {
            let slot = app.session.slots.iter().find(|slot| slot.id == slot_id);
            match slot {
                Some(slot) if slot.is_active => Span::styled(
                    format!(" {} [ACTIVE] ", slot.label()),
                    Style::default().fg(Color::Green),
                ),
                Some(slot) => Span::styled(
                    format!(" {} ", slot.label()),
                    Style::default().fg(Color::Yellow),
                ),
                None => Span::styled(format!(" {slot_id} "), Style::default().fg(Color::Yellow)),
            }
        }
        None => Span::styled(" no slot selected ", Style::default().fg(Color::Red)),
    };

    let header = Paragraph::new(vec![Line::from(vec![
        Span::raw(" Yatai POS "),
        Span::styled(
            " Festival Food Stall ",
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("|"),
        slot_span,
        if app.session.is_loading {
            Span::styled(
                " LOADING... ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("")
        },
    ])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(header, area);
}

fn stock_span(stock: Stock) -> Span<'static> {
    match stock {
        Stock::NotOffered => {
            Span::styled("not offered", Style::default().fg(Color::DarkGray))
        }
        Stock::SoldOut => Span::styled(
            "SOLD OUT",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Stock::Remaining(n) if n < LOW_STOCK_THRESHOLD => {
            Span::styled(format!("{n} left"), Style::default().fg(Color::Yellow))
        }
        Stock::Remaining(n) => {
            Span::styled(format!("{n} left"), Style::default().fg(Color::Green))
        }
    }
}

fn draw_products(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = match &app.session.catalog {
        Some(catalog) if !catalog.products.is_empty() => catalog
            .products
            .iter()
            .map(|product| {
                let in_cart = app.session.cart.quantity_of(&product.id);
                let cart_marker = if in_cart > 0 {
                    format!(" [x{in_cart}]")
                } else {
                    String::new()
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:<24}", product.name)),
                    Span::styled(
                        format!("¥{:<8}", product.price),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    stock_span(catalog.stock_of(&product.id)),
                    Span::styled(cart_marker, Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect(),
        _ => vec![ListItem::new(Line::from(Span::styled(
            "no products",
            Style::default().fg(Color::DarkGray),
        )))],
    };

    let list = List::new(items)
        .block(Block::default().title(" Products ").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.product_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_cart(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if app.session.cart.is_empty() {
        lines.push(Line::from(Span::styled(
            "cart is empty",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for line in app.session.cart.lines() {
            lines.push(Line::from(vec![
                Span::raw(format!("{:<18}", line.name)),
                Span::raw(format!("¥{} × {}", line.price, line.quantity)),
                Span::styled(
                    format!("  = ¥{}", line.price * line.quantity),
                    Style::default().fg(Color::Cyan),
                ),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Total: "),
        Span::styled(
            format!("¥{}", app.session.cart.total_amount()),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Ticket: "),
        if app.session.ticket_number.is_empty() {
            Span::styled("-", Style::default().fg(Color::Red))
        } else {
            Span::styled(
                app.session.ticket_number.clone(),
                Style::default().fg(Color::Yellow),
            )
        },
    ]));

    let cart = Paragraph::new(lines)
        .block(Block::default().title(" Cart ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(cart, area);
}

fn draw_logs(frame: &mut Frame, app: &App, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(Block::default().title(" Logs ").borders(Borders::ALL))
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    frame.render_widget(logs, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hint = match app.mode {
        Mode::Normal => {
            "↑↓ select | Enter/a add | -/x remove | t ticket | s slot | c checkout | C clear | o settings | r refresh | q quit"
        }
        Mode::EditingTicket => "Enter save ticket number | Esc cancel",
        Mode::SelectingSlot => "↑↓ select slot | Enter confirm | Esc cancel",
        Mode::EditingSettings => "Enter save settings | Esc cancel",
    };

    let notice_line = match app.session.last_notice() {
        Some(notice) => {
            let style = match notice.level {
                NoticeLevel::Info => Style::default().fg(Color::Green),
                NoticeLevel::Error => Style::default().fg(Color::Red),
            };
            Line::from(Span::styled(
                format!("{}: {}", notice.title, notice.body),
                style,
            ))
        }
        None => Line::from(""),
    };

    let footer = Paragraph::new(vec![
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        notice_line,
    ]);
    frame.render_widget(footer, area);
}

fn draw_slot_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 10, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = if app.session.slots.is_empty() {
        vec![ListItem::new("no sales slots")]
    } else {
        app.session
            .slots
            .iter()
            .map(|slot| {
                let mut spans = vec![Span::raw(slot.label())];
                if slot.is_active {
                    spans.push(Span::styled(
                        "  [ACTIVE]",
                        Style::default().fg(Color::Green),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().title(" Sales Slots ").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.slot_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_input_dialog(frame: &mut Frame, title: &str, input: &Input) {
    let area = centered_rect(60, 3, frame.area());
    frame.render_widget(Clear, area);

    let width = area.width.saturating_sub(2);
    let scroll = input.visual_scroll(width as usize);
    let paragraph = Paragraph::new(input.value())
        .scroll((0, scroll as u16))
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(paragraph, area);

    let cursor_x = input.visual_cursor().saturating_sub(scroll) as u16;
    frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
}

fn draw_payment_dialog(frame: &mut Frame, app: &App) {
    let total = app.session.cart.total_amount();

    match app.session.checkout.state() {
        CheckoutState::SelectingPayment => {
            let area = centered_rect(50, 8, frame.area());
            frame.render_widget(Clear, area);
            let body = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("Total: ¥{total}"),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("1) Cash"),
                Line::from("2) PayPay"),
                Line::from("3) Square"),
                Line::from(Span::styled(
                    "Esc cancel",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(
                Block::default()
                    .title(" Select Payment Method ")
                    .borders(Borders::ALL),
            );
            frame.render_widget(body, area);
        }
        CheckoutState::ConfirmingPayment {
            method: PaymentMethod::Square,
            ..
        } => {
            let area = centered_rect(60, 7, frame.area());
            frame.render_widget(Clear, area);

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Length(3)])
                .split(area);

            let info = Paragraph::new(vec![
                Line::from(format!("Square payment of ¥{total}")),
                Line::from(Span::styled(
                    "Take the payment in the Square POS app (link in the logs),",
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(
                    "then enter the transaction id. Enter confirm | Esc back",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(Block::default().title(" Square ").borders(Borders::ALL));
            frame.render_widget(info, chunks[0]);

            let width = chunks[1].width.saturating_sub(2);
            let scroll = app.transaction_input.visual_scroll(width as usize);
            let input = Paragraph::new(app.transaction_input.value())
                .scroll((0, scroll as u16))
                .block(
                    Block::default()
                        .title(" Transaction ID ")
                        .borders(Borders::ALL),
                );
            frame.render_widget(input, chunks[1]);

            let cursor_x = app.transaction_input.visual_cursor().saturating_sub(scroll) as u16;
            frame.set_cursor_position((chunks[1].x + cursor_x + 1, chunks[1].y + 1));
        }
        CheckoutState::ConfirmingPayment { method, .. } => {
            let area = centered_rect(50, 7, frame.area());
            frame.render_widget(Clear, area);

            let instructions = match method {
                PaymentMethod::Cash => "Collect the cash and hand back the change.",
                PaymentMethod::PayPay => "Have the customer pay in the PayPay app.",
                _ => "",
            };

            let body = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("{method}: ¥{total}"),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(instructions),
                Line::from(Span::styled(
                    "Enter confirm | Esc back",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(
                Block::default()
                    .title(" Confirm Payment ")
                    .borders(Borders::ALL),
            );
            frame.render_widget(body, area);
        }
        CheckoutState::Submitting { .. } => {
            let area = centered_rect(40, 3, frame.area());
            frame.render_widget(Clear, area);
            let body = Paragraph::new(Line::from(Span::styled(
                "Submitting order...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )))
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(body, area);
        }
        CheckoutState::Idle => {}
    }
}

/// Fixed-height popup rect centered horizontally at `percent_x` width
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(height),
            Constraint::Min(1),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
