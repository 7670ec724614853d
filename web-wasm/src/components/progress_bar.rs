//! 진행률 표시

use leptos::prelude::*;

#[component]
pub fn ProgressBar(progress: Signal<u8>) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%", progress.get())
                />
            </div>
            <p class="progress-text">
                {move || format!("분석 중... {}%", progress.get())}
            </p>
        </div>
    }
}
