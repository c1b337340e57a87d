use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use crate::dispatch::Dispatcher;
use crate::form::{FormInput, PageState};
use crate::render::render_page;

const MAX_FORM_BYTES: u64 = 16 * 1024;

fn with_dispatcher(
    dispatcher: Arc<Dispatcher>,
) -> impl Filter<Extract = (Arc<Dispatcher>,), Error = Infallible> + Clone {
    warp::any().map(move || dispatcher.clone())
}

async fn show_form() -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::html(render_page(&PageState::default())))
}

async fn submit_form(
    input: FormInput,
    dispatcher: Arc<Dispatcher>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let state = PageState::from_submission(&dispatcher, &input).await;
    Ok(warp::reply::html(render_page(&state)))
}

/// `GET /` shows the empty form; `POST /` runs a lookup and shows the result
pub fn routes(
    dispatcher: Arc<Dispatcher>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let show = warp::path::end()
        .and(warp::get())
        .and_then(show_form);

    let submit = warp::path::end()
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_FORM_BYTES))
        .and(warp::body::form::<FormInput>())
        .and(with_dispatcher(dispatcher))
        .and_then(submit_form);

    show.or(submit).with(warp::log("haru::web"))
}

/// Serve until the process is stopped
pub async fn serve(dispatcher: Arc<Dispatcher>, addr: SocketAddr) {
    tracing::info!("Listening on http://{}", addr);
    warp::serve(routes(dispatcher)).run(addr).await;
}
