//! Frontend crate for the flight pathfinder.
//!
//! Single page: two airport inputs, a submit button and up to three candidate routes.

mod fetch;

use log::{info, warn};
use pathfinder_shared::{
    AirportError, AirportList, QueryTicket, ResultSlot, RouteBoard, RouteError, RouteOutcome,
    RouteQuery, ServiceConfig, Settled,
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::fetch::{fetch_airports, fetch_routes};

const SUGGESTION_LIMIT: usize = 10;

#[derive(Properties, PartialEq)]
struct TextBoxProps {
    id: String,
    label: String,
    text: String,
    value: String,
    suggestions: Vec<String>,
    on_change: Callback<String>,
}

#[derive(Properties, PartialEq)]
struct ButtonProps {
    text: String,
    on_click: Callback<()>,
}

#[derive(Properties, PartialEq)]
struct ResultBlockProps {
    slot: ResultSlot,
}

#[function_component(TextBox)]
fn text_box(
    TextBoxProps {
        id,
        label,
        text,
        value,
        suggestions,
        on_change,
    }: &TextBoxProps,
) -> Html {
    let handle_input = {
        let on_change = on_change.clone();
        Callback::from(move |input_event: InputEvent| {
            let input_elem: HtmlInputElement = input_event.target_unchecked_into();
            on_change.emit(input_elem.value());
        })
    };

    // Suggestions only, the service decides what a valid airport is
    let list_id = format!("{}-airports", id);
    let options = suggestions.iter().map(|code| {
        html! {
            <option value={ code.clone() } />
        }
    });

    html! {
        <div class="mb-3">
            <label for={ id.clone() } class="form-label">{ label.clone() }</label>
            <input type={"text"} id={ id.clone() } class={"form-control"} list={ list_id.clone() } placeholder={ text.clone() } aria-label={ text.clone() } value={ value.clone() } oninput={ handle_input } />
            <datalist id={ list_id }>
                { for options }
            </datalist>
        </div>
    }
}

#[function_component(Button)]
fn button(ButtonProps { text, on_click }: &ButtonProps) -> Html {
    let on_click_fn = {
        let on_click = on_click.clone();
        Callback::from(move |_| on_click.emit(()))
    };

    html! {
        <button type={"button"} onclick={on_click_fn} class={"btn btn-primary my-2"}>{ text.clone() }</button>
    }
}

#[function_component(ResultBlock)]
fn result_block(ResultBlockProps { slot }: &ResultBlockProps) -> Html {
    if slot.is_blank() {
        return html! {};
    }

    html! {
        <div class="my-3">
            <h4>{ slot.heading.clone() }</h4>
            if let Some(metrics) = slot.metrics {
                <h5>
                    { metrics.distance_line() }
                    <br />
                    { metrics.time_line() }
                </h5>
            }
        </div>
    }
}

struct RouteFinder {
    config: ServiceConfig,
    airports: AirportList,
    source: String,
    dest: String,
    board: RouteBoard,
}

enum RouteFinderMessage {
    AirportsLoaded(Result<AirportList, AirportError>),
    SourceChanged(String),
    DestChanged(String),
    Submit,
    RoutesSettled(QueryTicket, Result<RouteOutcome, RouteError>),
}

impl RouteFinder {
    fn suggestions(&self, typed: &str) -> Vec<String> {
        self.airports
            .suggest(typed, SUGGESTION_LIMIT)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl Component for RouteFinder {
    type Properties = ();
    type Message = RouteFinderMessage;

    fn create(ctx: &Context<Self>) -> Self {
        let config = ServiceConfig::default();

        {
            let config = config.clone();
            ctx.link().send_future(async move {
                RouteFinderMessage::AirportsLoaded(fetch_airports(&config).await)
            });
        }

        Self {
            config,
            airports: AirportList::default(),
            source: String::new(),
            dest: String::new(),
            board: RouteBoard::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            RouteFinderMessage::AirportsLoaded(Ok(airports)) => {
                info!("Loaded {} airports", airports.len());
                self.airports = airports;
                true
            }
            RouteFinderMessage::AirportsLoaded(Err(e)) => {
                warn!("Error fetching airports: {:?}", e);
                false
            }
            RouteFinderMessage::SourceChanged(source) => {
                self.source = source;
                true
            }
            RouteFinderMessage::DestChanged(dest) => {
                self.dest = dest;
                true
            }
            RouteFinderMessage::Submit => {
                let ticket = self
                    .board
                    .begin(RouteQuery::new(self.source.clone(), self.dest.clone()));
                let config = self.config.clone();

                ctx.link().send_future(async move {
                    let result = fetch_routes(&config, ticket.query()).await;
                    RouteFinderMessage::RoutesSettled(ticket, result)
                });
                true
            }
            RouteFinderMessage::RoutesSettled(ticket, result) => {
                self.board.settle(ticket, result) == Settled::Applied
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        let slots = self
            .board
            .slots()
            .into_iter()
            .map(|slot| html! { <ResultBlock slot={ slot } /> })
            .collect::<Html>();

        html! {
            <div class="container">
                <br />
                <h1>{ "Flight Pathfinding with A*" }</h1>
                <form>
                    <TextBox id={"source"} label={"From:"} text={"Enter Source"} value={ self.source.clone() } suggestions={ self.suggestions(&self.source) } on_change={ link.callback(RouteFinderMessage::SourceChanged) } />
                    <TextBox id={"dest"} label={"To:"} text={"Enter Destination"} value={ self.dest.clone() } suggestions={ self.suggestions(&self.dest) } on_change={ link.callback(RouteFinderMessage::DestChanged) } />
                    <Button text={"Submit"} on_click={ link.callback(|_| RouteFinderMessage::Submit) } />
                </form>
                <br />
                <h3>{ "Result Paths:" }</h3>
                if self.board.is_loading() {
                    <p class="text-muted">{ "Searching for routes..." }</p>
                }
                { slots }
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());

    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("route-finder"));

    match root {
        Some(root) => yew::Renderer::<RouteFinder>::with_root(root).render(),
        None => yew::Renderer::<RouteFinder>::new().render(),
    };
}
