//! Tick-driven orchestration of the active menu and the menu switcher.
//!
//! The caller owns the loop: call [`Mixer::tick`] with the current time, then
//! sleep. Everything runs on that one call, there is no background work.

use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::PixelSink;
use crate::config::Settings;
use crate::encoder::EncoderProbe;
use crate::error::MixerError;
use crate::events::{EventQueue, MixerEvent};
use crate::menu::{MENU_COUNT, MenuId, MenuSlot};
use crate::pixel_bus::{PixelBusManager, StripConfig};
use crate::screen::Screen;
use crate::state::{MenuState, StateStore};
use crate::switcher::MenuSwitcher;

/// Hardware the mixer drives
pub struct MixerIo<P, D, T> {
    pub probe: P,
    pub screen: D,
    pub store: T,
}

pub struct Mixer<'a, P, S, D, T, const STRIPS: usize, const EVENTS: usize>
where
    P: EncoderProbe,
    S: PixelSink,
    D: Screen,
    T: StateStore,
{
    settings: Settings,
    probe: P,
    bus: PixelBusManager<S, STRIPS>,
    screen: D,
    store: T,
    events: &'a EventQueue<EVENTS>,

    switcher: MenuSwitcher<P::Encoder>,
    menu: MenuSlot<P::Encoder>,
}

impl<'a, P, S, D, T, const STRIPS: usize, const EVENTS: usize> Mixer<'a, P, S, D, T, STRIPS, EVENTS>
where
    P: EncoderProbe,
    S: PixelSink,
    D: Screen,
    T: StateStore,
{
    /// Open every strip once, load the saved state and activate the first
    /// menu.
    ///
    /// A state document that cannot be read is replaced by defaults.
    pub fn new<F>(
        settings: Settings,
        io: MixerIo<P, D, T>,
        mut open_strip: F,
        events: &'a EventQueue<EVENTS>,
        now: Instant,
    ) -> Result<Self, MixerError>
    where
        F: FnMut(&StripConfig) -> S,
    {
        let MixerIo {
            mut probe,
            mut screen,
            mut store,
        } = io;

        let mut bus = PixelBusManager::new();
        for strip in settings.strips() {
            bus.open(strip, &mut open_strip)?;
        }

        let state = store.load().unwrap_or_else(|_err| {
            #[cfg(feature = "esp32-log")]
            println!("[Mixer.new] failed to load state, using defaults: {:?}", _err);
            MenuState::default()
        });

        let switcher = MenuSwitcher::new(
            probe.probe(&settings.menu_encoder),
            settings.menu_encoder.address,
            MENU_COUNT,
            settings.menu_step_threshold,
            settings.debounce,
            now,
        );
        let menu = MenuSlot::build(
            MenuId::RgbMix,
            &settings,
            &state,
            &mut probe,
            &bus,
            &mut screen,
            now,
        )?;

        Ok(Self {
            settings,
            probe,
            bus,
            screen,
            store,
            events,
            switcher,
            menu,
        })
    }

    /// Run one pass of the control loop
    pub fn tick(&mut self, now: Instant) {
        self.menu.update_trails(&mut self.bus, now);

        let sensitivity = self.menu.knob_sensitivity();
        let toggles = self.menu.update_encoders(true, sensitivity, now);
        for (channel, toggle) in toggles.into_iter().enumerate() {
            if let Some(enabled) = toggle {
                self.events
                    .publish(MixerEvent::ChannelToggled { channel, enabled });
            }
        }

        self.menu.update_screen(&mut self.screen, now);

        let update = self.switcher.update(now);
        if update.button_pressed {
            self.events.publish(MixerEvent::MenuButtonPressed);
        }
        if let Some(index) = update.selected {
            self.switch_to(index, now);
        }
    }

    /// Replace the active menu with the one at `index`.
    ///
    /// The outgoing menu's state is saved and seeds the new one.
    pub fn switch_to(&mut self, index: usize, now: Instant) {
        let Some(id) = MenuId::from_index(index) else {
            return;
        };
        #[cfg(feature = "esp32-log")]
        println!("[Mixer.switch_to] switching to menu: {}", id.as_str());

        let state = self.persist();
        self.screen.clear();
        match MenuSlot::build(
            id,
            &self.settings,
            &state,
            &mut self.probe,
            &self.bus,
            &mut self.screen,
            now,
        ) {
            Ok(menu) => {
                self.menu = menu;
                self.events.publish(MixerEvent::MenuSelected(index));
            }
            Err(_err) => {
                #[cfg(feature = "esp32-log")]
                println!("[Mixer.switch_to] failed to build menu: {}", _err);
                // The screen is already cleared, keep the old menu but redraw it
                self.menu.reset_screen(&mut self.screen, now);
            }
        }
    }

    /// Export the active menu and write it to the store.
    ///
    /// A failed write is logged and otherwise ignored.
    pub fn persist(&mut self) -> MenuState {
        let state = self.menu.export_state();
        if let Err(_err) = self.store.save(&state) {
            #[cfg(feature = "esp32-log")]
            println!("[Mixer.persist] failed to save state: {:?}", _err);
        }
        state
    }

    pub const fn menu(&self) -> &MenuSlot<P::Encoder> {
        &self.menu
    }

    pub fn menu_id(&self) -> MenuId {
        self.menu.id()
    }

    pub const fn switcher(&self) -> &MenuSwitcher<P::Encoder> {
        &self.switcher
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    pub const fn bus(&self) -> &PixelBusManager<S, STRIPS> {
        &self.bus
    }

    pub const fn screen(&self) -> &D {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut D {
        &mut self.screen
    }

    pub const fn store(&self) -> &T {
        &self.store
    }
}
