#![cfg(shuttle)]

use shuttle::sync::Arc;
use shuttle::thread;
use shuttle::thread::JoinHandle;

use fdtab::Error;
use fdtab::Fd;
use fdtab::FdTab;

const ITERATIONS: usize = 1000;
const THREADS: usize = 4;

type ArcTable = Arc<FdTab<usize>>;

fn spawn_all<F>(table: &ArcTable, f: F) -> Vec<JoinHandle<()>>
where
  F: Fn(&FdTab<usize>, Fd) + Send + Sync + Copy + 'static,
{
  (0..THREADS)
    .map(|id| {
      let table: ArcTable = ArcTable::clone(table);
      thread::spawn(move || f(&table, id as Fd))
    })
    .collect()
}

#[test]
fn test_reserve_distinct_keys() {
  shuttle::check_random(
    || {
      let table: ArcTable = Arc::new(FdTab::with_capacity(2));

      let handles: Vec<JoinHandle<()>> = spawn_all(&table, |table, id| {
        table.reserve(id, id as usize).unwrap().release();
      });

      for handle in handles {
        handle.join().unwrap();
      }

      assert_eq!(table.len(), THREADS);

      for id in 0..THREADS {
        assert_eq!(*table.find(id as Fd).unwrap(), id);
      }
    },
    ITERATIONS,
  );
}

#[test]
fn test_checkout_exclusive() {
  shuttle::check_random(
    || {
      let table: ArcTable = Arc::new(FdTab::new());

      table.reserve(0, 0).unwrap().release();

      let handles: Vec<JoinHandle<()>> = spawn_all(&table, |table, _| {
        let mut counter = table.find(0).unwrap();
        let value: usize = *counter;
        thread::yield_now();
        *counter = value + 1;
      });

      for handle in handles {
        handle.join().unwrap();
      }

      assert_eq!(*table.find(0).unwrap(), THREADS);
    },
    ITERATIONS,
  );
}

#[test]
fn test_reserve_then_remove() {
  shuttle::check_random(
    || {
      let table: ArcTable = Arc::new(FdTab::with_capacity(1));

      let handles: Vec<JoinHandle<()>> = spawn_all(&table, |table, id| {
        table.reserve(id, id as usize).unwrap().release();
        thread::yield_now();
        assert_eq!(table.find(id).unwrap().remove(), Ok(id as usize));
      });

      for handle in handles {
        handle.join().unwrap();
      }

      assert!(table.is_empty());
    },
    ITERATIONS,
  );
}

#[test]
fn test_shared_key_stack() {
  shuttle::check_random(
    || {
      let table: ArcTable = Arc::new(FdTab::new());

      let handles: Vec<JoinHandle<()>> = spawn_all(&table, |table, id| {
        table.reserve(7, id as usize).unwrap().release();
      });

      for handle in handles {
        handle.join().unwrap();
      }

      let mut seen: Vec<usize> = Vec::with_capacity(THREADS);

      while let Ok(entry) = table.find(7) {
        seen.push(entry.remove().unwrap());
      }

      seen.sort_unstable();

      assert_eq!(seen, (0..THREADS).collect::<Vec<usize>>());
      assert_eq!(table.find(7).unwrap_err(), Error::NotFound);
    },
    ITERATIONS,
  );
}
