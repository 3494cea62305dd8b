//! Blocks the Caps Lock key system-wide for thirty seconds.

#[cfg(windows)]
fn main() {
    use std::{thread, time::Duration};

    use mouse_key_hook::{HookKind, hook_thread::spawn_hook_thread};
    use windows::Win32::UI::Input::KeyboardAndMouse::VK_CAPITAL;

    #[cfg(feature = "log")]
    colog::init();

    let hook = spawn_hook_thread(HookKind::GlobalKeyboard, |data| {
        let event = unsafe { data.keyboard_event() };
        event.virtual_key() != VK_CAPITAL
    })
    .unwrap();

    thread::sleep(Duration::from_secs(30));
    hook.stop().unwrap();
}

#[cfg(not(windows))]
fn main() {
    eprintln!("this demo requires Windows");
}
