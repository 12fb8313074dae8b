use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::domain::StatusFilter;
use crate::modules::orders::{ListDisplay, OrderListController, OrderRow};
use crate::store::OrderSnapshot;
use crate::ui::widgets::{status_badge, truncate_str};

pub const TITLE: &str = "Delliv - Rastreio Fácil";
pub const LOADING_MESSAGE: &str = "Carregando...";
pub const EMPTY_MESSAGE: &str = "Nenhum pedido disponível.";

const HEADERS: [&str; 6] = ["Cliente", "Endereço", "Entregador", "Pedido em", "Status", "-"];
const AVATAR: &str = "◉ ";
const ACTION_LABEL: &str = " Prosseguir ";

const CUSTOMER_WIDTH: u16 = 24;
const DELIVERER_WIDTH: u16 = 16;
const DATE_WIDTH: u16 = 10;
const STATUS_WIDTH: u16 = 12;
const ACTION_WIDTH: u16 = 12;
const MIN_ADDRESS_WIDTH: u16 = 12;
const HIGHLIGHT_SYMBOL: &str = ">> ";

pub fn render(
    f: &mut Frame,
    area: Rect,
    ctl: &OrderListController,
    snapshot: &OrderSnapshot,
    focused: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    draw_header(f, chunks[0], ctl.filter());

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Pedidos")
        .border_style(border_style);

    match ctl.display(snapshot) {
        ListDisplay::Loading => {
            let paragraph = Paragraph::new(LOADING_MESSAGE)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(paragraph, chunks[1]);
        }
        ListDisplay::Error(message) => {
            let paragraph = Paragraph::new(format!("Erro: {message}"))
                .style(Style::default().fg(Color::LightRed))
                .block(block)
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, chunks[1]);
        }
        ListDisplay::Empty => {
            let paragraph = Paragraph::new(EMPTY_MESSAGE).block(block);
            f.render_widget(paragraph, chunks[1]);
        }
        ListDisplay::Table(orders) => {
            let address_width = address_column_width(chunks[1].width);
            let rows: Vec<Row> = orders
                .iter()
                .map(|order| table_row(&OrderRow::from_order(order), address_width))
                .collect();

            let header = Row::new(HEADERS.iter().map(|title| Cell::from(*title))).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );

            let highlight_style = if focused {
                Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            let table = Table::new(
                rows,
                [
                    Constraint::Length(CUSTOMER_WIDTH),
                    Constraint::Min(MIN_ADDRESS_WIDTH),
                    Constraint::Length(DELIVERER_WIDTH),
                    Constraint::Length(DATE_WIDTH),
                    Constraint::Length(STATUS_WIDTH),
                    Constraint::Length(ACTION_WIDTH),
                ],
            )
            .header(header)
            .block(block.title(format!("Pedidos ({})", orders.len())))
            .highlight_style(highlight_style)
            .highlight_symbol(HIGHLIGHT_SYMBOL);

            let mut state = TableState::default();
            state.select(Some(ctl.cursor().min(orders.len() - 1)));
            f.render_stateful_widget(table, chunks[1], &mut state);
        }
    }
}

fn draw_header(f: &mut Frame, area: Rect, active: StatusFilter) {
    let mut selector = vec![Span::styled("Status ", Style::default().fg(Color::DarkGray))];
    for (idx, filter) in StatusFilter::ALL.iter().enumerate() {
        let label = format!(" {}:{} ", idx, filter.label());
        let style = if *filter == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightCyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        selector.push(Span::styled(label, style));
    }
    let selector_width = selector.iter().map(|span| span.width()).sum::<usize>() as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(selector_width)])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Left);

    let filter = Paragraph::new(Line::from(selector))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Right);

    f.render_widget(title, chunks[0]);
    f.render_widget(filter, chunks[1]);
}

fn table_row(row: &OrderRow, address_width: usize) -> Row<'static> {
    let customer = Line::from(vec![
        Span::styled(AVATAR, Style::default().fg(Color::LightBlue)),
        Span::raw(truncate_str(
            &row.customer,
            (CUSTOMER_WIDTH as usize).saturating_sub(AVATAR.chars().count()),
        )),
    ]);
    let address = Span::styled(
        truncate_str(&row.address, address_width),
        Style::default().fg(Color::DarkGray),
    );
    let action = Span::styled(
        ACTION_LABEL,
        Style::default().fg(Color::White).bg(Color::Blue),
    );

    Row::new(vec![
        Cell::from(customer),
        Cell::from(address),
        Cell::from(row.deliverer.clone()),
        Cell::from(row.created.clone()),
        Cell::from(status_badge(&row.status_label, row.status_color)),
        Cell::from(action),
    ])
}

/// Width left for the address once the fixed columns, borders, highlight
/// symbol and column spacing are taken out
fn address_column_width(total: u16) -> usize {
    let fixed = CUSTOMER_WIDTH + DELIVERER_WIDTH + DATE_WIDTH + STATUS_WIDTH + ACTION_WIDTH;
    let chrome = 2 + HIGHLIGHT_SYMBOL.chars().count() as u16 + (HEADERS.len() as u16 - 1);
    total
        .saturating_sub(fixed + chrome)
        .max(MIN_ADDRESS_WIDTH) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_width_never_below_minimum() {
        assert_eq!(address_column_width(40), MIN_ADDRESS_WIDTH as usize);
        assert_eq!(address_column_width(200), 200 - 74 - 10);
    }
}
