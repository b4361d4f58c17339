use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::watch;

use business::application::workflow::confirmation::ConfirmationGate;
use business::domain::notification::model::Notification;
use business::domain::product::model::Product;

use crate::setup::dependency_injection::DependencyContainer;

/// Terminal rendition of the search-and-delete page.
pub struct Console {
    container: DependencyContainer,
}

impl Console {
    pub fn new(container: DependencyContainer) -> Self {
        Self { container }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let search = &self.container.search;
        let observer = search.spawn_deletion_observer();
        let renderer = tokio::spawn(render_notifications(
            self.container.state.subscribe_notification(),
        ));
        let mut input = BufReader::new(tokio::io::stdin()).lines();

        println!("Producto a Eliminar (escribe 'salir' para terminar)");
        while let Some(line) = prompt(&mut input, "Id Producto *: ").await? {
            let line = line.trim();
            if line == "salir" {
                break;
            }

            if !search.accept_input(line) {
                continue;
            }

            println!("Buscando...");
            search.submit().await;

            let Some(product) = search.view().product else {
                continue;
            };
            render_product(&product);

            let answer = prompt(&mut input, "¿Eliminar este producto? [s/N]: ").await?;
            if !matches!(answer.as_deref().map(str::trim), Some("s" | "S")) {
                continue;
            }
            if let Some(gate) = search.open_confirmation() {
                self.confirm(&gate, &mut input).await?;
            }
        }

        observer.abort();
        renderer.abort();
        Ok(())
    }

    async fn confirm(
        &self,
        gate: &ConfirmationGate,
        input: &mut Lines<BufReader<Stdin>>,
    ) -> anyhow::Result<()> {
        println!(
            "¿Necesitas eliminar este producto? {}. Esta acción no se puede deshacer.",
            gate.product().name
        );

        let answer = prompt(input, "[E]liminar / [C]ancelar: ").await?;
        if !matches!(answer.as_deref().map(str::trim), Some("e" | "E")) {
            gate.request_close();
            return Ok(());
        }

        println!("Eliminando...");
        if gate.confirm_delete().await.is_some() {
            let mut view = self.container.search.subscribe();
            view.wait_for(|view| view.product.is_none()).await?;
        }
        Ok(())
    }
}

async fn prompt(
    input: &mut Lines<BufReader<Stdin>>,
    label: &str,
) -> anyhow::Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

fn render_product(product: &Product) {
    println!("Id Producto | Nombre del Producto");
    println!("{} | {}", product.id, product.name);
}

async fn render_notifications(mut notifications: watch::Receiver<Option<Notification>>) {
    while notifications.changed().await.is_ok() {
        let current = notifications.borrow_and_update().clone();
        match current {
            Some(notification) if notification.succeeded => {
                println!("\n[OK] {}", notification.message)
            }
            Some(notification) => println!("\n[ERROR] {}", notification.message),
            None => tracing::debug!("Notification cleared"),
        }
    }
}
