//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Nav, Toast};
use crate::pages::{Dashboard, Predict, UploadTrain};
use crate::state::global::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-50 text-gray-900 flex flex-col">
                // Navigation header
                <Nav />

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Dashboard />
                        <Route path="/upload-train" view=UploadTrain />
                        <Route path="/predict" view=Predict />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Footer with backend connectivity status
                <Footer />

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Footer component probing the backend once on startup
#[component]
fn Footer() -> impl IntoView {
    let (connected, set_connected) = create_signal(None::<bool>);

    create_effect(move |_| {
        spawn_local(async move {
            set_connected.set(Some(api::test_connection().await.is_ok()));
        });
    });

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-white border-t border-gray-200 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <div class="flex items-center space-x-2">
                    {move || {
                        match connected.get() {
                            Some(true) => view! {
                                <span class="flex items-center space-x-1 text-green-600">
                                    <span class="w-2 h-2 bg-green-500 rounded-full" />
                                    <span>"Backend connecté"</span>
                                </span>
                            }.into_view(),
                            Some(false) => view! {
                                <span class="flex items-center space-x-1 text-red-600">
                                    <span class="w-2 h-2 bg-red-500 rounded-full" />
                                    <span>"Backend injoignable"</span>
                                </span>
                            }.into_view(),
                            None => view! {
                                <span class="text-gray-400">"Vérification du backend..."</span>
                            }.into_view(),
                        }
                    }}
                </div>

                <div class="text-gray-400">"Prévision du trafic passagers ONCF"</div>
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page introuvable"</h1>
            <p class="text-gray-500 mb-6">"La page demandée n'existe pas."</p>
            <A
                href="/"
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium transition-colors"
            >
                "Retour au dashboard"
            </A>
        </div>
    }
}
