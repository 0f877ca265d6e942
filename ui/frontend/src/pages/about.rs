use leptos::*;

#[component]
pub fn About() -> impl IntoView {
    view! {
        <div class="max-w-screen-md mx-auto p-6 text-content-1 space-y-4">
            <h1 class="text-3xl font-bold">"About FallerTrack"</h1>
            <p>
                "FallerTrack helps caregivers look after elderly people living at a care home. "
                "A wearable reports the position of the person and detects falls, and this "
                "dashboard shows both on a live map."
            </p>
            <ul class="list-disc pl-6 space-y-1">
                <li>"A safe zone around the home that can be moved and resized."</li>
                <li>"Live position of the person, refreshed every few seconds."</li>
                <li>"An alert banner as soon as a fall is detected."</li>
                <li>"An SOS switch that notifies the emergency contacts."</li>
                <li>"Nearby hospitals and clinics with directions and a call link."</li>
                <li>"A daily summary of movement and fall events."</li>
            </ul>
        </div>
    }
}
