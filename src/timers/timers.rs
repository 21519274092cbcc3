use std::collections::HashMap;
use std::time::{Duration, Instant};

// A single named timer with its children.  A timer is running whenever
// `started` holds the instant of its most recent start.
#[derive(Debug, Default)]
struct TimerNode {
    started: Option<Instant>,
    elapsed: Duration,
    children: HashMap<&'static str, TimerNode>,
}

impl TimerNode {
    fn clear(&mut self) {
        self.started = None;
        self.elapsed = Duration::ZERO;
        self.children.clear();
    }

    fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    fn stop(&mut self) {
        self.elapsed += self.started.take().unwrap().elapsed();
    }

    // bank the elapsed time of a running timer without marking it
    // stopped, recursing into the children
    fn suspend(&mut self) {
        if let Some(instant) = self.started {
            self.elapsed += instant.elapsed();
            for child in self.children.values_mut() {
                child.suspend();
            }
        }
    }

    // restart the clock of a (suspended) running timer
    fn resume(&mut self) {
        if self.started.is_some() {
            self.started = Some(Instant::now());
            for child in self.children.values_mut() {
                child.resume();
            }
        }
    }

    fn print(&self, name: &str, depth: usize) {
        println!("{:indent$}{} : {:?}", "", name, self.elapsed, indent = 4 * depth);
        for (name, child) in self.children.iter() {
            child.print(name, depth + 1);
        }
    }
}

/// A stack of named hierarchical timers.
///
/// Starting a timer while another is running registers it as a child;
/// totals are reported per level by [`print`](Timers::print).
#[derive(Default, Debug)]
pub struct Timers {
    stack: Vec<&'static str>,
    roots: HashMap<&'static str, TimerNode>,
}

impl Timers {
    // the innermost running timer, following the name stack
    fn active(&mut self) -> Option<&mut TimerNode> {
        let mut keys = self.stack.iter();
        let mut node = self.roots.get_mut(keys.next()?).unwrap();
        for key in keys {
            node = node.children.get_mut(key).unwrap();
        }
        Some(node)
    }

    pub fn reset_timer(&mut self, key: &'static str) {
        self.roots.entry(key).or_default().clear();
    }

    /// starts a timer with the given name as the current timer
    pub fn start_as_current(&mut self, key: &'static str) {
        match self.active() {
            // child of the innermost running timer
            Some(node) => node.children.entry(key).or_default().start(),
            // nothing running, new root
            None => self.roots.entry(key).or_default().start(),
        }
        self.stack.push(key);
    }

    /// stops the current timer.  There should always be one active when
    /// this function is reached.
    pub fn stop_current(&mut self) {
        self.active().unwrap().stop();
        self.stack.pop();
    }

    /// Suspend every running timer, e.g. around untimed I/O.
    pub fn suspend(&mut self) {
        for node in self.roots.values_mut() {
            node.suspend();
        }
    }

    /// Restart every suspended timer.
    pub fn resume(&mut self) {
        for node in self.roots.values_mut() {
            node.resume();
        }
    }

    /// Total elapsed time over the top-level timers.
    pub fn total_time(&self) -> Duration {
        self.roots.values().map(|t| t.elapsed).sum()
    }

    pub fn print(&self) {
        for (name, node) in self.roots.iter() {
            node.print(name, 0);
        }
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {

        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;

macro_rules! notimeit {
    ($timer:ident; $($tt:tt)+) => {

        $timer.suspend();
        $(
            $tt
        )+
        $timer.resume();
    }
}
pub(crate) use notimeit;
