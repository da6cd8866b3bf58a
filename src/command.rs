//! Commands from the control layer
//!
//! The web handler and the render loop may run in different contexts, so
//! commands travel through a bounded queue guarded by `critical-section`.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Largest simulation speed the control layer may request
pub const MAX_REQUESTED_SPEED_SECS: u8 = 30;

/// Smallest simulation speed the control layer may request
pub const MIN_REQUESTED_SPEED_SECS: u8 = 1;

/// Change requested by the control layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyCommand {
    /// Switch the simulated clock on or off
    SetSimulation(bool),
    /// Set the simulation speed in real seconds per simulated hour
    SetSimulationSpeed(u8),
    /// Show or blank the sky
    SetSkyEnabled(bool),
}

impl SkyCommand {
    /// Build a speed command from a raw request, clamped to `1..=30`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn simulation_speed(requested_secs: i32) -> Self {
        let secs = requested_secs.clamp(
            i32::from(MIN_REQUESTED_SPEED_SECS),
            i32::from(MAX_REQUESTED_SPEED_SECS),
        );
        Self::SetSimulationSpeed(secs as u8)
    }
}

/// Returned when the queue is full; carries the rejected command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError(pub SkyCommand);

/// Bounded command queue
pub struct CommandChannel<const SIZE: usize> {
    queue: Mutex<RefCell<Deque<SkyCommand, SIZE>>>,
}

impl<const SIZE: usize> CommandChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for the control layer
    pub const fn sender(&self) -> CommandSender<'_, SIZE> {
        CommandSender { channel: self }
    }

    /// Handle for the render loop
    pub const fn receiver(&self) -> CommandReceiver<'_, SIZE> {
        CommandReceiver { channel: self }
    }

    fn push(&self, command: SkyCommand) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .push_back(command)
                .map_err(TrySendError)
        })
    }

    fn pop(&self) -> Option<SkyCommand> {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().pop_front())
    }
}

impl<const SIZE: usize> Default for CommandChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending side of a [`CommandChannel`]
#[derive(Clone, Copy)]
pub struct CommandSender<'a, const SIZE: usize> {
    channel: &'a CommandChannel<SIZE>,
}

impl<const SIZE: usize> CommandSender<'_, SIZE> {
    /// Queue a command without blocking
    pub fn try_send(&self, command: SkyCommand) -> Result<(), TrySendError> {
        self.channel.push(command)
    }
}

/// Receiving side of a [`CommandChannel`]
#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const SIZE: usize> {
    channel: &'a CommandChannel<SIZE>,
}

impl<const SIZE: usize> CommandReceiver<'_, SIZE> {
    /// Take the oldest queued command, if any
    pub fn try_receive(&self) -> Option<SkyCommand> {
        self.channel.pop()
    }
}
