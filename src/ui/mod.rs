use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod widgets;

use crate::app::{App, InputMode};
use crate::core::{NotifyLevel, Route};
use crate::domain::Order;
use crate::modules::orders::{self, ListDisplay};
use crate::modules::sidebar::{self, LOGO};
use widgets::{centered_rect, Modal};

const MODAL_TITLE: &str = "Título do Modal";
const MODAL_BODY: &str = "Lore ipsum Lore ipsum Lore ipsum Lore ipsum Lore ipsum Lore ipsum \
Lore ipsum Lore ipsum Lore ipsum Lore ipsum Lore ipsum";

pub fn draw(f: &mut Frame, app: &mut App) {
    let areas = layout::areas(f.size());
    app.wide = areas.wide;

    let snapshot = app.snapshot();
    let card_orders: &[Order] = match ListDisplay::from_snapshot(snapshot) {
        ListDisplay::Table(orders) => orders,
        _ => &[],
    };

    if let Some(area) = areas.sidebar {
        sidebar::render(
            f,
            area,
            &app.sidebar,
            app.route,
            card_orders,
            &app.settings.profile,
            app.sidebar_active(),
        );
    }
    if let Some(area) = areas.top_bar {
        draw_top_bar(f, area, app);
    }

    let page_focused = !app.sidebar_active() && app.input_mode == InputMode::Normal;
    match app.route {
        Route::Orders => orders::render(f, areas.page, &app.orders, snapshot, page_focused),
        Route::Contact => draw_contact_page(f, areas.page, app),
        Route::Settings => draw_settings_page(f, areas.page, app),
    }

    if !areas.wide && app.sidebar.is_open() {
        f.render_widget(Clear, areas.overlay);
        sidebar::render(
            f,
            areas.overlay,
            &app.sidebar,
            app.route,
            card_orders,
            &app.settings.profile,
            true,
        );
    }

    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.orders.modal_open() {
        let body = vec![Line::from(MODAL_BODY)];
        f.render_widget(Modal::new(MODAL_TITLE).body(body).size(60, 40), areas.size);
    }
    if app.help_open {
        draw_help_popup(f, areas.size);
    }
}

fn draw_top_bar(f: &mut Frame, area: Rect, app: &App) {
    let toggle = if app.sidebar.is_open() { "✕ menu" } else { "☰ menu" };
    let line = Line::from(vec![
        Span::styled(
            LOGO,
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("[m] {toggle}"), Style::default().fg(Color::DarkGray)),
    ]);
    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn draw_contact_page(f: &mut Frame, area: Rect, app: &App) {
    let contact = &app.settings.contact;
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::styled(
            "Fale com a gente",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ];
    match (contact.phone.as_deref(), contact.email.as_deref()) {
        (None, None) => lines.push(Line::styled(
            "Nenhum contato configurado. Preencha a seção [contact] do arquivo de configuração.",
            label,
        )),
        (phone, email) => {
            if let Some(phone) = phone {
                lines.push(Line::from(vec![
                    Span::styled("Telefone ", label),
                    Span::raw(phone.to_string()),
                ]));
            }
            if let Some(email) = email {
                lines.push(Line::from(vec![
                    Span::styled("E-mail   ", label),
                    Span::raw(email.to_string()),
                ]));
            }
        }
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Contato").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_settings_page(f: &mut Frame, area: Rect, app: &App) {
    let label = Style::default().fg(Color::DarkGray);
    let path_or_unknown = |path: Option<&std::path::Path>| {
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(desconhecido)".to_string())
    };
    let settings = &app.settings;
    let endpoint = if settings.endpoint.is_empty() {
        "(conectando)".to_string()
    } else {
        settings.endpoint.clone()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Configuração  ", label),
            Span::raw(path_or_unknown(settings.config_path.as_deref())),
        ]),
        Line::from(vec![
            Span::styled("Fonte         ", label),
            Span::raw(endpoint),
        ]),
        Line::from(vec![
            Span::styled("Log           ", label),
            Span::raw(path_or_unknown(settings.log_path.as_deref())),
        ]),
        Line::from(vec![
            Span::styled("Exportações   ", label),
            Span::raw(settings.export_dir.display().to_string()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Perfil        ", label),
            Span::raw(settings.profile.name.clone()),
        ]),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Configurações").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.snapshot();
    let state = if snapshot.loading {
        "carregando"
    } else if snapshot.error.is_some() {
        "erro"
    } else {
        "ok"
    };

    let mut spans = vec![
        Span::styled("Página ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.route.path())),
        Span::styled("Filtro ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.orders.filter().label())),
        Span::styled("Pedidos ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{} ({state})  ", snapshot.orders.len())),
        Span::styled("Foco ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.focus_label()),
    ];

    if let Some((text, level)) = app.status_text() {
        let color = match level {
            NotifyLevel::Info => Color::LightGreen,
            NotifyLevel::Warn => Color::Yellow,
            NotifyLevel::Error => Color::LightRed,
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(text.to_string(), Style::default().fg(color)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

fn command_hint(input: &str) -> Option<&'static str> {
    let head = input.split_whitespace().next()?;
    match head {
        "filter" | "f" | "status" => Some("todos | opened | done | canceled | progress"),
        "export" => Some("csv | json"),
        "go" => Some("pedidos | contato | config"),
        _ => None,
    }
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command_input)
                .unwrap_or("filter <status> | refresh | export csv|json | menu | help | quit");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command_input.as_str()),
                Span::styled(format!("  {hint}"), Style::default().fg(Color::DarkGray)),
            ])
        }
        InputMode::Normal => Line::from(Span::styled(
            ": comandos  ? ajuda  m menu  q sair",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(content), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(64, 70, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navegação"),
        Line::from("  Tab / m     Menu lateral"),
        Line::from("  j / k       Mover seleção"),
        Line::from("  g / G       Topo / fim"),
        Line::from("  Enter / p   Prosseguir com o pedido"),
        Line::from("  Esc         Fechar"),
        Line::from(""),
        Line::from("Pedidos"),
        Line::from("  0-4         Filtrar por status"),
        Line::from("  f / F       Próximo / anterior status"),
        Line::from("  r           Recarregar"),
        Line::from("  e / E       Exportar CSV / JSON"),
        Line::from(""),
        Line::from("Comandos"),
        Line::from("  :filter done"),
        Line::from("  :refresh"),
        Line::from("  :export json"),
        Line::from("  :go contato"),
        Line::from(""),
        Line::from("  ?           Ajuda"),
        Line::from("  q           Sair"),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Ajuda").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup_area);
}
