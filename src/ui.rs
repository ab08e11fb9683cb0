//! Saída de terminal — status coloridos por estágio.
//!
//! Usa a crate `console` para estilização: verde para aprovado, vermelho
//! para rejeitado, amarelo para estágios intermediários.

use console::Style;

use crate::registry::ClientSummary;
use crate::workflow::{Script, Status, User};

/// Renderizador de entidades do fluxo para o terminal.
pub struct Render {
    green: Style,
    red: Style,
    yellow: Style,
    dim: Style,
}

impl Render {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            dim: Style::new().dim(),
        }
    }

    fn status_style(&self, status: Status) -> &Style {
        match status {
            Status::Approved => &self.green,
            Status::Rejected => &self.red,
            _ => &self.yellow,
        }
    }

    /// Imprime um roteiro completo, com notas quando presentes.
    pub fn script(&self, script: &Script) {
        println!(
            "{} {}  [{}]",
            self.dim.apply_to(script.id),
            script.title,
            self.status_style(script.status).apply_to(script.status)
        );
        println!(
            "  enviado em {}",
            script.submitted_at.format("%Y-%m-%d %H:%M")
        );
        if let Some(assignee) = script.assignee_id {
            println!("  responsável: {}", self.dim.apply_to(assignee));
        }
        if let Some(notes) = &script.analysis_notes {
            println!("  análise: {notes}");
        }
        if let Some(notes) = &script.revision_notes {
            println!("  revisão: {notes}");
        }
    }

    /// Imprime uma linha por roteiro de uma listagem.
    pub fn script_row(&self, script: &Script) {
        println!(
            "{}  {:<30}  {}",
            self.dim.apply_to(script.id),
            script.title,
            self.status_style(script.status).apply_to(script.status)
        );
    }

    /// Imprime um cliente e o resumo dos seus roteiros.
    pub fn client(&self, summary: &ClientSummary) {
        println!(
            "{} <{}> tel {}",
            summary.name,
            summary.email,
            summary.phone
        );
        for script in &summary.scripts {
            println!(
                "  {}  {:<30}  {}",
                self.dim.apply_to(script.id),
                script.title,
                self.status_style(script.status).apply_to(script.status)
            );
        }
    }

    /// Imprime uma linha por usuário interno.
    pub fn user(&self, user: &User) {
        println!(
            "{}  {:<20}  {}",
            self.dim.apply_to(user.id),
            user.name,
            user.role
        );
    }
}

impl Default for Render {
    fn default() -> Self {
        Self::new()
    }
}
