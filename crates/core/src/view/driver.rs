use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use color_eyre::eyre::{self, WrapErr as _};
use futures::future::BoxFuture;
use tokio::{
    select,
    sync::{mpsc, watch},
    task::{JoinError, JoinHandle},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::{Cycle, View, ViewState};
use crate::params::Prerequisites;

/// The fetch behind a page.
pub trait Loader: Send + Sync + 'static {
    type Params: Clone + Send + Sync + 'static;
    type Output: Clone + Send + Sync + 'static;

    /// Shown in place of the data when [`Loader::load`] fails. The error itself is only logged.
    fn error_message(&self) -> String;

    fn load(&self, params: Self::Params) -> BoxFuture<'static, eyre::Result<Self::Output>>;
}

type Completion<T> = (Cycle, eyre::Result<T>);

/// Owns a page's [`View`]: starts a fetch whenever the prerequisites change and publishes
/// every state transition on a watch channel.
///
/// Fetches are never aborted. A fetch that finishes after newer prerequisites arrived is
/// dropped instead of being rendered.
pub struct ViewDriver<L: Loader> {
    loader: L,
    params_rx: watch::Receiver<Prerequisites<L::Params>>,
    state_tx: watch::Sender<ViewState<L::Output>>,
    view: View<L::Output>,
    shutdown_token: CancellationToken,
}

impl<L: Loader> ViewDriver<L> {
    /// Spawns the driver on the current tokio runtime.
    ///
    /// The current prerequisites are applied before this returns, so the first state seen
    /// on the handle already reflects them.
    pub fn spawn(
        loader: L,
        mut params_rx: watch::Receiver<Prerequisites<L::Params>>,
        shutdown_token: CancellationToken,
    ) -> ViewHandle<L::Output> {
        let mut view = View::new();
        let initial = view.apply(params_rx.borrow_and_update().clone());
        let (state_tx, state_rx) = watch::channel(view.state().clone());

        let driver = Self {
            loader,
            params_rx,
            state_tx,
            view,
            shutdown_token: shutdown_token.child_token(),
        };
        let task = tokio::spawn(driver.run(initial));

        ViewHandle {
            shutdown_token,
            task: Some(task),
            state_rx,
        }
    }

    #[instrument(name = "view_driver", skip_all)]
    async fn run(self, initial: Option<(Cycle, L::Params)>) -> eyre::Result<()> {
        let Self {
            loader,
            mut params_rx,
            state_tx,
            mut view,
            shutdown_token,
        } = self;

        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion<L::Output>>();
        if let Some((cycle, params)) = initial {
            start_fetch(&loader, cycle, params, &done_tx);
        }

        let mut params_open = true;

        loop {
            select! {
                () = shutdown_token.cancelled() => {
                    info!("view driver received shutdown signal");
                    break Ok(())
                }

                changed = params_rx.changed(), if params_open => {
                    if changed.is_err() {
                        debug!("prerequisite source closed");
                        params_open = false;
                        continue;
                    }

                    let prerequisites = params_rx.borrow_and_update().clone();
                    if let Some((cycle, params)) = view.apply(prerequisites) {
                        start_fetch(&loader, cycle, params, &done_tx);
                    }
                    state_tx.send_replace(view.state().clone());
                }

                Some((cycle, outcome)) = done_rx.recv() => {
                    let outcome = outcome.map_err(|e| {
                        warn!(error = %e, "fetch failed");
                        loader.error_message()
                    });

                    if view.settle(cycle, outcome) {
                        state_tx.send_replace(view.state().clone());
                    } else {
                        debug!(?cycle, latest = ?view.latest(), "discarding stale fetch result");
                    }
                }
            }
        }
    }
}

fn start_fetch<L: Loader>(
    loader: &L,
    cycle: Cycle,
    params: L::Params,
    done_tx: &mpsc::UnboundedSender<Completion<L::Output>>,
) {
    debug!(?cycle, "starting fetch");
    let fetch = loader.load(params);
    let done_tx = done_tx.clone();
    tokio::spawn(async move {
        let outcome = fetch.await;
        // a closed channel means the driver already shut down
        let _ = done_tx.send((cycle, outcome));
    });
}

/// Returned by [`ViewDriver::spawn`]. Awaiting it waits for the driver to exit.
pub struct ViewHandle<T> {
    shutdown_token: CancellationToken,
    task: Option<JoinHandle<eyre::Result<()>>>,
    state_rx: watch::Receiver<ViewState<T>>,
}

impl<T: Clone> ViewHandle<T> {
    pub fn state_rx(&self) -> watch::Receiver<ViewState<T>> {
        self.state_rx.clone()
    }

    pub fn current(&self) -> ViewState<T> {
        self.state_rx.borrow().clone()
    }

    /// Waits until the view is no longer loading and returns that state.
    pub async fn settled(&mut self) -> eyre::Result<ViewState<T>> {
        let state = self
            .state_rx
            .wait_for(|state| !state.is_loading())
            .await
            .wrap_err("view driver stopped before the view settled")?;
        Ok(state.clone())
    }

    /// Cancels the driver and waits for it to exit. In-flight fetches are left to finish
    /// on their own; their results go nowhere.
    pub async fn shutdown(mut self) -> eyre::Result<()> {
        self.shutdown_token.cancel();
        match self.task.take() {
            Some(task) => flatten_join_result(task.await),
            None => Ok(()),
        }
    }
}

impl<T> Future for ViewHandle<T> {
    type Output = eyre::Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        use futures::future::FutureExt as _;

        match self.task.as_mut() {
            Some(task) => task.poll_unpin(cx).map(flatten_join_result),
            None => Poll::Ready(Ok(())),
        }
    }
}

fn flatten_join_result<T>(res: Result<eyre::Result<T>, JoinError>) -> eyre::Result<T> {
    match res {
        Ok(Ok(res)) => Ok(res),
        Ok(Err(e)) => Err(e).wrap_err("view driver returned with error"),
        Err(e) => Err(e).wrap_err("view driver panicked"),
    }
}
