use teloxide::dispatching::{DpHandlerDescription, HandlerExt, UpdateFilterExt};
use teloxide::{dptree, RequestError};
use teloxide::dptree::Handler;
use teloxide::prelude::{DependencyMap, Update};

use super::handlers::*;
use super::commands::*;
use super::filters::*;


pub fn build_handler() -> Handler<'static, DependencyMap, Result<(), RequestError>, DpHandlerDescription> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(handle_command))
                .branch(dptree::filter_map(user_text)
                    .endpoint(handle_text))
        )
        .branch(
            Update::filter_callback_query()
                .endpoint(handle_callback_query)
        )
}
