use std::time::Duration;
use std::iter::Enumerate;

use console::style;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;


pub(crate) trait ProgressObserver {

    // the parameters are passed as callbacks in case the progress implementation doesn't care (such as the unit observer used by tests)
    fn start_known_endpoint<Message: AsRef<str>, Callback: FnOnce() -> (Message,usize)>(&mut self, callback: Callback);

    fn start<Message: AsRef<str>, Callback: FnOnce() -> (Message,Option<usize>)>(&mut self, callback: Callback);

    fn update<Callback: FnOnce() -> usize>(&self, callback: Callback);

    fn warning<Message: AsRef<str>, Callback: FnOnce() -> Message>(&self, callback: Callback);

    fn finish<Message: AsRef<str>, Callback: FnOnce() -> Message>(&mut self, callback: Callback);

}


// This one allows for not observing when you don't need it.
impl ProgressObserver for () {

    fn start_known_endpoint<Message: AsRef<str>, Callback: FnOnce() -> (Message,usize)>(&mut self, _: Callback) {
    }

    fn start<Message: AsRef<str>, Callback: FnOnce() -> (Message,Option<usize>)>(&mut self, _: Callback) {
    }

    fn update<Callback: FnOnce() -> usize>(&self, _: Callback) {
    }

    fn warning<Message: AsRef<str>, Callback: FnOnce() -> Message>(&self, _: Callback){
    }

    fn finish<Message: AsRef<str>, Callback: FnOnce() -> Message>(&mut self, _: Callback) {
    }
}


pub(crate) struct ConsoleProgressBar {

    bar: Option<ProgressBar>

}

impl ConsoleProgressBar {

    pub(crate) const fn new() -> Self {
        Self {
            bar: None
        }
    }

    fn template(template: &str) -> ProgressStyle {
        // the templates are constants, a bad one is only a cosmetic problem
        ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn style_as_spinner(bar: &ProgressBar) {
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(Self::template("({elapsed_precise}) {msg} {spinner}"));
    }

    fn style_as_progress(bar: &ProgressBar) {
        bar.disable_steady_tick();
        bar.set_style(Self::template("({elapsed_precise}) [{bar:40}] {pos}/{len} {msg}").progress_chars("=> "));
    }

    fn style_as_finished(bar: &ProgressBar) {
        bar.set_style(Self::template("({elapsed_precise}) {msg}"));
    }

    fn start_bar<Message: AsRef<str>>(&mut self, message: Message, step_count: Option<usize>) {
        if let Some(bar) = &self.bar {
            bar.reset();
            if let Some(step_count) = step_count {
                bar.set_length(step_count as u64);
                Self::style_as_progress(bar)
            } else {
                Self::style_as_spinner(bar);
            }
            bar.set_message(message.as_ref().to_owned());
        } else {
            let bar = if let Some(step_count) = step_count {
                let bar = ProgressBar::new(step_count as u64);
                Self::style_as_progress(&bar);
                bar
            } else {
                let bar = ProgressBar::new_spinner();
                Self::style_as_spinner(&bar);
                bar
            };
            bar.set_message(message.as_ref().to_owned());
            self.bar = Some(bar);
        }
    }

}

impl ProgressObserver for ConsoleProgressBar {

    fn start_known_endpoint<Message: AsRef<str>, Callback: FnOnce() -> (Message,usize)>(&mut self, callback: Callback) {
        let (message,step_count) = callback();
        self.start_bar(message, Some(step_count))
    }

    fn start<Message: AsRef<str>, Callback: FnOnce() -> (Message,Option<usize>)>(&mut self, callback: Callback) {
        let (message,step_count) = callback();
        self.start_bar(message, step_count)
    }

    fn update<Callback: FnOnce() -> usize>(&self, callback: Callback) {
        if let Some(bar) = &self.bar {
            bar.set_position(callback() as u64);
        }
    }

    fn warning<Message: AsRef<str>, Callback: FnOnce() -> Message>(&self, callback: Callback){
        let message = format!("{}",style(callback().as_ref()).yellow());
        if let Some(bar) = &self.bar {
            bar.println(message)
        } else {
            eprintln!("{}",message)
        }
    }

    fn finish<Message: AsRef<str>, Callback: FnOnce() -> Message>(&mut self, callback: Callback) {
        if let Some(bar) = &mut self.bar {
            Self::style_as_finished(bar);
            bar.finish_with_message(callback().as_ref().to_owned());
            self.bar = None;
        }
    }

}

pub(crate) struct IteratorWatcher<'progress,Message: AsRef<str>, Progress: ProgressObserver, IteratorType> {
    finish: Message,
    progress: &'progress mut Progress,
    inner: Enumerate<IteratorType>
}

impl<Message: AsRef<str>, Progress: ProgressObserver, ItemType, IteratorType: Iterator<Item=ItemType>> Iterator for IteratorWatcher<'_,Message,Progress,IteratorType> {

    type Item = ItemType;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((i,next)) = self.inner.next() {
            self.progress.update(|| i + 1);
            Some(next)
        } else {
            self.progress.finish(|| &self.finish);
            None
        }

    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

}

pub(crate) trait WatchableIterator: Iterator + Sized {

    fn watch<StartMessage: AsRef<str>, FinishMessage: AsRef<str>, Progress: ProgressObserver>(self, progress: &mut Progress, start: StartMessage, finish: FinishMessage) -> IteratorWatcher<'_, FinishMessage, Progress, Self>;
}

impl<IteratorType: Iterator> WatchableIterator for IteratorType {

    fn watch<StartMessage: AsRef<str>, FinishMessage: AsRef<str>, Progress: ProgressObserver>(self, progress: &mut Progress, start: StartMessage, finish: FinishMessage) -> IteratorWatcher<'_, FinishMessage, Progress, Self> {
        progress.start(|| (start,self.size_hint().1));
        IteratorWatcher {
            finish,
            progress,
            inner: self.enumerate()
        }

    }

}

#[cfg(test)]
pub(crate) mod test {

    use core::cell::RefCell;

    use super::ProgressObserver;
    use super::WatchableIterator;

    /// Remembers the step counts and positions it was given.
    #[derive(Default)]
    pub(crate) struct StepRecorder {
        pub(crate) step_counts: Vec<Option<usize>>,
        pub(crate) positions: RefCell<Vec<usize>>,
    }

    impl ProgressObserver for StepRecorder {

        fn start_known_endpoint<Message: AsRef<str>, Callback: FnOnce() -> (Message,usize)>(&mut self, callback: Callback) {
            self.step_counts.push(Some(callback().1));
        }

        fn start<Message: AsRef<str>, Callback: FnOnce() -> (Message,Option<usize>)>(&mut self, callback: Callback) {
            self.step_counts.push(callback().1);
        }

        fn update<Callback: FnOnce() -> usize>(&self, callback: Callback) {
            self.positions.borrow_mut().push(callback());
        }

        fn warning<Message: AsRef<str>, Callback: FnOnce() -> Message>(&self, _: Callback) {
        }

        fn finish<Message: AsRef<str>, Callback: FnOnce() -> Message>(&mut self, _: Callback) {
        }
    }

    #[test]
    fn test_watch_reaches_end() {
        let mut progress = StepRecorder::default();
        let items: Vec<char> = "abc".chars().watch(&mut progress, "Watching.", "Watched.").collect();
        assert_eq!(items,vec!['a','b','c']);
        assert_eq!(progress.step_counts,vec![Some(3)]);
        assert_eq!(progress.positions.into_inner(),vec![1,2,3]);
    }

}
