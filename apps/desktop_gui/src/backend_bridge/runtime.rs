//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{backends_for, ClientSettings, PostMutations, PostSource};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: ClientSettings,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build backend runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let (source, mutations) = backends_for(&settings);
        tracing::info!(
            posts_url = %settings.posts_url,
            mutation_mode = ?settings.mutation_mode,
            "backend worker ready"
        );
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let event = execute(cmd, source.as_ref(), mutations.as_ref()).await;
                if !deliver_event(&ui_tx, event) {
                    break;
                }
            }
            tracing::debug!("backend worker stopped");
        });
    });
}

pub async fn execute(
    cmd: BackendCommand,
    source: &dyn PostSource,
    mutations: &dyn PostMutations,
) -> UiEvent {
    tracing::debug!(command = cmd.name(), "running backend command");
    match cmd {
        BackendCommand::LoadPosts => UiEvent::PostsLoaded(source.fetch_posts().await),
        BackendCommand::CreatePost { draft } => match mutations.create(draft).await {
            Ok(post) => UiEvent::PostCreated(post),
            Err(err) => failure(UiErrorContext::CreatePost, err),
        },
        BackendCommand::UpdatePost { update } => match mutations.update(update).await {
            Ok(post) => UiEvent::PostUpdated(post),
            Err(err) => failure(UiErrorContext::UpdatePost, err),
        },
        BackendCommand::DeletePost { post_id } => match mutations.delete(post_id).await {
            Ok(post_id) => UiEvent::PostDeleted(post_id),
            Err(err) => failure(UiErrorContext::DeletePost, err),
        },
    }
}

/// Hands a result to the UI. Load results wait for room since the UI stays
/// in `Loading` until one arrives; other results are dropped on a full queue.
/// Returns false once the UI side is gone.
pub fn deliver_event(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(event @ UiEvent::PostsLoaded(_))) => {
            tracing::debug!("ui event queue full; waiting to deliver load result");
            ui_tx.send(event).is_ok()
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!("ui event queue full; dropping backend result");
            true
        }
        Err(TrySendError::Disconnected(_)) => false,
    }
}

fn failure(context: UiErrorContext, err: client_core::MutationError) -> UiEvent {
    tracing::warn!(?context, "post mutation failed: {err}");
    UiEvent::Error(UiError::from_message(context, err.to_string()))
}

#[cfg(test)]
mod tests {
    use client_core::{HttpPostSource, LoadError, LocalPostMutations};
    use shared::domain::{NewPost, PostId, PostUpdate};

    use super::*;

    fn unreachable_source() -> HttpPostSource {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        HttpPostSource::new(format!("http://{addr}/posts"))
    }

    #[tokio::test]
    async fn local_mutations_echo_back_as_events() {
        let source = unreachable_source();

        let event = execute(
            BackendCommand::CreatePost {
                draft: NewPost {
                    id: PostId(6),
                    title: "new".into(),
                },
            },
            &source,
            &LocalPostMutations,
        )
        .await;
        assert!(matches!(
            event,
            UiEvent::PostCreated(post) if post.id == PostId(6) && post.title == "new"
        ));

        let event = execute(
            BackendCommand::UpdatePost {
                update: PostUpdate {
                    id: PostId(2),
                    title: "renamed".into(),
                },
            },
            &source,
            &LocalPostMutations,
        )
        .await;
        assert!(matches!(event, UiEvent::PostUpdated(post) if post.title == "renamed"));

        let event = execute(
            BackendCommand::DeletePost {
                post_id: PostId(2),
            },
            &source,
            &LocalPostMutations,
        )
        .await;
        assert!(matches!(event, UiEvent::PostDeleted(PostId(2))));
    }

    #[test]
    fn load_results_wait_for_a_full_queue() {
        let (ui_tx, ui_rx) = crossbeam_channel::bounded::<UiEvent>(1);
        assert!(deliver_event(&ui_tx, UiEvent::Info("busy".into())));
        assert!(deliver_event(&ui_tx, UiEvent::PostDeleted(PostId(1))));
        assert_eq!(ui_rx.len(), 1);

        let drain = thread::spawn(move || {
            let first = ui_rx.recv().expect("first event");
            let second = ui_rx.recv().expect("load result");
            (first, second)
        });
        assert!(deliver_event(&ui_tx, UiEvent::PostsLoaded(Ok(Vec::new()))));
        let (first, second) = drain.join().expect("drain thread");
        assert!(matches!(first, UiEvent::Info(message) if message == "busy"));
        assert!(matches!(second, UiEvent::PostsLoaded(Ok(posts)) if posts.is_empty()));
    }

    #[test]
    fn delivery_stops_once_ui_is_gone() {
        let (ui_tx, ui_rx) = crossbeam_channel::bounded::<UiEvent>(0);
        drop(ui_rx);
        assert!(!deliver_event(&ui_tx, UiEvent::PostsLoaded(Ok(Vec::new()))));
        assert!(!deliver_event(&ui_tx, UiEvent::PostDeleted(PostId(1))));
    }

    #[tokio::test]
    async fn failed_load_is_delivered_as_load_result() {
        let source = unreachable_source();
        let event = execute(BackendCommand::LoadPosts, &source, &LocalPostMutations).await;
        assert!(matches!(
            event,
            UiEvent::PostsLoaded(Err(LoadError::Transport(_)))
        ));
    }
}
