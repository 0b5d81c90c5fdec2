use crate::{AppState, CollectionAction, Effect, Msg, PanelEffect};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadProductLines => {
            state.begin_product_line_load();
            vec![Effect::FetchProductLines]
        }
        Msg::ProductLinesLoaded {
            records,
            received_at,
        } => {
            state.provision(records, received_at);
            Vec::new()
        }
        Msg::ProductLinesFailed(error) => {
            state.fail_product_line_load(error);
            Vec::new()
        }
        Msg::Store(action) => {
            state.reduce_store(action);
            Vec::new()
        }
        Msg::Panel {
            product_line_id,
            msg,
        } => {
            let Some(panel_effects) = state.update_panel(&product_line_id, msg) else {
                return (state, Vec::new());
            };
            let mut effects = Vec::with_capacity(panel_effects.len() * 2);
            for effect in panel_effects {
                match effect {
                    PanelEffect::FetchJobs { since_date } => {
                        // Both listings go out together; each resolves on its own.
                        state.route(
                            product_line_id.clone(),
                            CollectionAction::BeginFetch { since_date },
                        );
                        effects.push(Effect::FetchJobIds {
                            product_line_id: product_line_id.clone(),
                            since_date,
                        });
                        effects.push(Effect::FetchJobs {
                            product_line_id: product_line_id.clone(),
                            since_date,
                        });
                    }
                    PanelEffect::Notify(notification) => {
                        effects.push(Effect::Notify(notification));
                    }
                }
            }
            effects
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}
