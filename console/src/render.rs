//! Text rendering of the view-model.

use std::fmt::Write;

use cadastro_core::view::{ContactRow, ContactView, CustomerRow, CustomerView};
use cadastro_core::{Section, TableState, ViewModel};

pub fn render(view: &ViewModel) -> String {
    let mut out = String::new();
    match view.section {
        Section::Customers => render_customers(&mut out, &view.customers),
        Section::Contacts => render_contacts(&mut out, &view.contacts),
    }
    out
}

fn render_table<R>(out: &mut String, table: &TableState<R>, row: impl Fn(&R) -> String) {
    match table {
        TableState::Rows(rows) => {
            for r in rows {
                let _ = writeln!(out, "  {}", row(r));
            }
        }
        TableState::Placeholder(text) | TableState::Error(text) => {
            let _ = writeln!(out, "  {text}");
        }
    }
}

fn customer_line(r: &CustomerRow) -> String {
    format!(
        "#{:<4} {:<28} {:<15} {:<11} {:<24} [{}]",
        r.id,
        r.name,
        r.cpf,
        r.birth_date,
        r.address,
        r.contacts_label()
    )
}

fn contact_line(r: &ContactRow) -> String {
    format!("#{:<4} {:<12} {:<30} {}", r.id, r.kind, r.value, r.observation)
}

fn render_customers(out: &mut String, view: &CustomerView) {
    let _ = writeln!(out, "== Clientes ==");
    if !view.search_term.trim().is_empty() {
        let _ = writeln!(out, "Busca: {}", view.search_term);
    }
    render_table(out, &view.table, customer_line);
    let form = &view.form;
    let _ = writeln!(out, "-- {} --", view.form_title());
    let _ = writeln!(
        out,
        "  nome: {} | cpf: {} | nascimento: {} | endereco: {}",
        form.name, form.cpf, form.birth_date, form.address
    );
    if view.cancel_visible() {
        let _ = writeln!(out, "  ('cancelar' para sair da edição)");
    }
}

fn render_contacts(out: &mut String, view: &ContactView) {
    let name = view
        .scope
        .as_ref()
        .map(|s| s.customer_name.as_str())
        .unwrap_or_default();
    let _ = writeln!(out, "== Contatos de {name} ==");
    render_table(out, &view.table, contact_line);
    let form = &view.form;
    let _ = writeln!(out, "-- {} --", view.form_title());
    let _ = writeln!(
        out,
        "  tipo: {} | valor: {} | obs: {}",
        form.kind, form.value, form.observation
    );
    if view.cancel_visible() {
        let _ = writeln!(out, "  ('cancelar' para sair da edição)");
    }
    let _ = writeln!(out, "  ('voltar' para a lista de clientes)");
}
