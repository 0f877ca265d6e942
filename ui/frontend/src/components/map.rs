use js_sys::{Function, Reflect};
use leptos::*;
use leptos_leaflet::*;
use wasm_bindgen::{JsCast, JsValue};
use ui_common::{
    scene::{MapScene, PersonMarkerStyle, SosMarker},
    Action, Coordinate,
};

use crate::DashboardContext;

fn position(c: Coordinate) -> Position {
    Position::new(c.lat, c.lng)
}

/// Position of the marker a leaflet drag event was fired on
fn dragged_position(event: &JsValue) -> Option<Coordinate> {
    let marker = Reflect::get(event, &JsValue::from_str("target")).ok()?;
    let get_lat_lng: Function = Reflect::get(&marker, &JsValue::from_str("getLatLng"))
        .ok()?
        .dyn_into()
        .ok()?;
    let lat_lng = get_lat_lng.call0(&marker).ok()?;
    let lat = Reflect::get(&lat_lng, &JsValue::from_str("lat")).ok()?.as_f64()?;
    let lng = Reflect::get(&lat_lng, &JsValue::from_str("lng")).ok()?.as_f64()?;
    Some(Coordinate::new(lat, lng))
}

/// Projects one field out of the scene, `fallback` while there is none
fn select<T: Clone + 'static>(
    scene: Memo<Option<MapScene>>,
    fallback: T,
    f: impl Fn(&MapScene) -> T + 'static,
) -> Signal<T> {
    Signal::derive(move || {
        scene
            .with(|s| s.as_ref().map(&f))
            .unwrap_or_else(|| fallback.clone())
    })
}

/// Clicking the marker toggles the shared selection. Only the selected
/// location gets a popup, so the map and the SOS list never disagree.
#[component]
fn SosMarkerView(marker: SosMarker) -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let SosMarker {
        place_id,
        name,
        vicinity,
        position: pos,
        open,
        directions_url,
        call_url,
    } = marker;

    let mouse_events = MouseEvents::new().click(move |_| {
        ctx.dispatch(Action::SosSelectionToggled(place_id.clone()))
    });

    view! {
        <Marker position=position(pos) mouse_events=mouse_events/>
        {open.then(|| view! {
            <Popup position=position(pos)>
                <strong>{name}</strong>
                <p>{vicinity}</p>
                <div class="flex gap-2 pt-1">
                    <a href=directions_url target="_blank" rel="noopener">"Get directions"</a>
                    <a href=call_url>"Emergency call"</a>
                </div>
            </Popup>
        })}
    }
}

#[component]
pub fn Map(scene: Memo<Option<MapScene>>) -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let origin = Position::new(0.0, 0.0);

    let center = scene
        .with_untracked(|s| s.as_ref().map(|s| position(s.center)))
        .unwrap_or(origin);

    let fence_center = select(scene, origin, |s| position(s.geofence.center));
    let fence_radius = select(scene, 0.0, |s| s.geofence.radius);
    let fence_color = select(scene, String::new(), |s| {
        if s.geofence.editable { "#f97316" } else { "#2563eb" }.to_string()
    });

    let route = select(scene, vec![], |s| {
        s.route
            .iter()
            .flatten()
            .map(|c| position(*c))
            .collect::<Vec<_>>()
    });

    let home_pos = select(scene, origin, |s| position(s.home.position));
    let home = select(scene, None, |s| Some(s.home.clone()));
    let editing =
        create_memo(move |_| scene.with(|s| s.as_ref().is_some_and(|s| s.home.editing)));

    let has_person =
        create_memo(move |_| scene.with(|s| s.as_ref().is_some_and(|s| s.person.is_some())));
    let person_pos = select(scene, origin, |s| {
        s.person.map(|p| position(p.position)).unwrap_or(origin)
    });
    let sos_active = create_memo(move |_| {
        scene.with(|s| {
            s.as_ref()
                .and_then(|s| s.person)
                .is_some_and(|p| p.style == PersonMarkerStyle::SosActive)
        })
    });

    let sos_markers = select(scene, vec![], |s| s.sos.clone());

    let config = ctx.config();
    let tile_url = config.tile_url.clone();
    let attribution = config.tile_attribution.clone();

    let on_home_action = move |_| {
        let editing = ctx.state.with_untracked(|s| s.geofence.is_editing());
        ctx.dispatch(if editing {
            Action::SaveGeofence
        } else {
            Action::EditGeofence
        });
    };

    view! {
        <MapContainer style="height: 60vh" center=center zoom=16.0 set_view=true class="z-0 rounded-lg">
            <TileLayer url=tile_url attribution=attribution/>
            <Circle center=fence_center radius=fence_radius color=fence_color/>
            <Polyline positions=route color="#16a34a"/>

            // Rebuilt on mode change, the marker can only be dragged while editing
            {move || {
                let draggable = editing.get();
                let drag_events = DragEvents::new().drag_end(move |event| {
                    let event: &JsValue = event.as_ref();
                    match dragged_position(event) {
                        Some(center) => ctx.dispatch(Action::GeofenceCenterChanged(center)),
                        None => log::warn!("Cannot read the dragged home marker position"),
                    }
                });
                view! {
                    <Marker position=home_pos draggable=draggable drag_events=drag_events>
                        <Popup>
                            {move || home.get().map(|h| view! {
                                <strong>{h.name}</strong>
                                <p>{format!("Radius: {:.0} m", h.radius)}</p>
                                <p>{format!("Last update: {}", h.last_update)}</p>
                            })}
                            <button on:click=on_home_action class="mt-1 text-blue-700 underline">
                                {if draggable { "Save safe zone" } else { "Edit safe zone" }}
                            </button>
                        </Popup>
                    </Marker>
                }
            }}

            <Show when=move || has_person.get()>
                <Marker position=person_pos>
                    <Popup>
                        <strong>"Lansia"</strong>
                        <p>{move || {
                            let p = person_pos.get();
                            format!("{:.6}, {:.6}", p.lat, p.lng)
                        }}</p>
                        <Show when=move || sos_active.get()>
                            <p class="font-bold text-red-600">"SOS Aktif!"</p>
                        </Show>
                    </Popup>
                </Marker>
                <Show when=move || sos_active.get()>
                    <Circle center=person_pos radius=25.0 color="#dc2626"/>
                </Show>
            </Show>

            <For
                each=move || sos_markers.get()
                key=|m| (m.place_id.clone(), m.open)
                children=move |marker| view! { <SosMarkerView marker=marker/> }
            />
        </MapContainer>
    }
}
