use crate::ui::screens::{
    CollectionScreen, SearchByIdScreen, SearchByNameScreen, SearchByPokedexScreen,
    SearchBySetScreen, WelcomeScreen,
};
use crate::ui::state::{AppState, Screen};
use eframe::egui::{self, ViewportBuilder};

pub struct CardBinderApp {
    state: AppState,
}

impl Default for CardBinderApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for CardBinderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drain finished background work onto this thread before drawing
        let delivered = self.state.dispatcher.poll() + self.state.loader.poll();
        if delivered > 0 || self.state.loader.has_pending() {
            ctx.request_repaint();
        }

        match self.state.current_screen {
            Screen::Welcome => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    WelcomeScreen::show(ui, &mut self.state);
                });
            }
            Screen::SearchById => SearchByIdScreen::show(ctx, &mut self.state),
            Screen::SearchByName => SearchByNameScreen::show(ctx, &mut self.state),
            Screen::SearchBySet => SearchBySetScreen::show(ctx, &mut self.state),
            Screen::SearchByPokedex => SearchByPokedexScreen::show(ctx, &mut self.state),
            Screen::Collection => CollectionScreen::show(ctx, &mut self.state),
        }
    }
}

pub fn launch_gui() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([900.0, 700.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Card Binder",
        options,
        Box::new(|_cc| Ok(Box::new(CardBinderApp::default()))),
    )
}
