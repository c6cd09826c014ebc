use std::future::Future;
use std::sync::Arc;

use tegridy_execution::{DiceRoller, State};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::commands::{render_help, Command, COMMANDS};
use crate::gateway::{Gateway, Incoming, Responder};
use crate::render;
use crate::service::EconomyService;

/// Routes commands from a [`Gateway`] to the [`EconomyService`].
pub struct Bot<S: State, D: DiceRoller + Send> {
    service: Arc<EconomyService<S, D>>,
    display_name: String,
}

impl<S, D> Bot<S, D>
where
    S: State + 'static,
    D: DiceRoller + Send + 'static,
{
    pub fn new(service: Arc<EconomyService<S, D>>, display_name: impl Into<String>) -> Self {
        Self {
            service,
            display_name: display_name.into(),
        }
    }

    /// Startup housekeeping. Nothing here can stop the bot.
    pub async fn on_ready<R: Responder>(&self, responder: &R) {
        match responder.set_display_name(&self.display_name).await {
            Ok(()) => info!(name = %self.display_name, "display name set"),
            Err(err) => warn!(name = %self.display_name, ?err, "could not set display name"),
        }
        info!(
            commands = ?COMMANDS.iter().map(|c| c.name).collect::<Vec<_>>(),
            "synced {} command(s)",
            COMMANDS.len()
        );
    }

    /// Serve commands until the gateway closes or `shutdown` resolves, then let in-flight commands
    /// finish.
    pub async fn run<G: Gateway>(
        &self,
        mut gateway: G,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), crate::gateway::DeliveryError> {
        let responder = gateway.responder();
        self.on_ready(&responder).await;

        tokio::pin!(shutdown);
        let mut tasks = JoinSet::new();
        let result = loop {
            let incoming = tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested");
                    break Ok(());
                }
                incoming = gateway.next_command() => incoming,
            };
            match incoming {
                Ok(Some(incoming)) => {
                    let service = Arc::clone(&self.service);
                    let responder = responder.clone();
                    tasks.spawn(async move { dispatch(&service, &responder, incoming).await });
                }
                Ok(None) => {
                    info!("gateway closed");
                    break Ok(());
                }
                Err(err) => {
                    error!(?err, "gateway failed");
                    break Err(err);
                }
            }
            while let Some(joined) = tasks.try_join_next() {
                if let Err(err) = joined {
                    error!(?err, "command task panicked");
                }
            }
        };

        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                error!(?err, "command task panicked");
            }
        }
        result
    }
}

/// Handle one command and deliver the reply. Delivery failures are logged and dropped.
pub async fn dispatch<S, D, R>(service: &EconomyService<S, D>, responder: &R, incoming: Incoming)
where
    S: State,
    D: DiceRoller + Send,
    R: Responder,
{
    let text = respond(service, &incoming).await;
    if let Err(err) = responder.reply(&incoming.user_id, &text).await {
        warn!(user_id = %incoming.user_id, ?err, "failed to deliver reply");
    }
}

/// Reply text for one command.
pub async fn respond<S, D>(service: &EconomyService<S, D>, incoming: &Incoming) -> String
where
    S: State,
    D: DiceRoller + Send,
{
    let user_id = incoming.user_id.as_str();
    let command = match &incoming.command {
        Ok(command) => command,
        Err(err) => {
            debug!(user_id, %err, "unparseable command");
            return render::command_error(err);
        }
    };
    debug!(user_id, command = command.name(), "command received");

    let config = service.config();
    let reply = match command {
        Command::Daily => service
            .claim_daily_now(user_id)
            .await
            .map(|outcome| render::claim(&outcome, config)),
        Command::Balance => service
            .get_balance(user_id)
            .await
            .map(|view| render::balance(&view, config)),
        Command::Roll { amount } => service
            .place_bet(user_id, amount)
            .await
            .map(|receipt| render::bet(&receipt, config)),
        Command::Help => Ok(render_help()),
    };
    reply.unwrap_or_else(|err| render::service_error(&err).to_string())
}
